//! A single field on the game board.

use arrayvec::ArrayVec;

use board_view_types::{
    BorderStyle, Coord, FieldUpdate, CLASS_GAME_FIELD, CLASS_HIGHLIGHTED, CLASS_LOCKED,
    CLASS_SELECTED, CLASS_WORD, MAX_PENCIL_MARKS,
};

/// One grid position rendered as a discrete visual unit.
///
/// Identity (board size, x, y) and border variants are fixed at board
/// creation; content and the selected/highlighted markers mutate as the host
/// pushes state and the user clicks around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    board_size: u8,
    border_right: BorderStyle,
    border_bottom: BorderStyle,

    character: String,
    pencil: ArrayVec<String, MAX_PENCIL_MARKS>,
    word: bool,
    locked: bool,
    selected: bool,
    highlighted: bool,
}

impl Cell {
    pub(crate) fn new(
        coord: Coord,
        board_size: u8,
        border_right: BorderStyle,
        border_bottom: BorderStyle,
    ) -> Self {
        Self {
            coord,
            board_size,
            border_right,
            border_bottom,
            character: String::new(),
            pencil: ArrayVec::new(),
            word: false,
            locked: false,
            selected: false,
            highlighted: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn border_right(&self) -> BorderStyle {
        self.border_right
    }

    pub fn border_bottom(&self) -> BorderStyle {
        self.border_bottom
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn pencil(&self) -> &[String] {
        &self.pencil
    }

    /// Pencil marks as displayed: each entry prefixed by a single space.
    ///
    /// `["1", "2"]` renders as `" 1 2"`; an empty list renders as `""`.
    pub fn pencil_text(&self) -> String {
        let mut text = String::new();
        for mark in &self.pencil {
            text.push(' ');
            text.push_str(mark);
        }
        text
    }

    pub fn is_word(&self) -> bool {
        self.word
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Replace the host-controlled content of this cell.
    ///
    /// Selection and highlight markers are user/host concerns with their own
    /// operations and are deliberately untouched here.
    pub(crate) fn apply(&mut self, update: FieldUpdate) {
        self.character = update.character;
        self.pencil.clear();
        for mark in update.pencil.into_iter().take(MAX_PENCIL_MARKS) {
            self.pencil.push(mark);
        }
        self.word = update.word;
        self.locked = update.locked;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// The full marker list for this cell, in declaration order.
    ///
    /// This is the styling contract consumed by the host stylesheet: identity
    /// markers first, then border variants, then whichever state markers are
    /// currently set.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec![
            CLASS_GAME_FIELD.to_string(),
            format!("size-{}", self.board_size),
            self.coord.xpos_class(),
            self.coord.ypos_class(),
            self.border_right.right_class().to_string(),
            self.border_bottom.bottom_class().to_string(),
        ];
        if self.selected {
            classes.push(CLASS_SELECTED.to_string());
        }
        if self.highlighted {
            classes.push(CLASS_HIGHLIGHTED.to_string());
        }
        if self.word {
            classes.push(CLASS_WORD.to_string());
        }
        if self.locked {
            classes.push(CLASS_LOCKED.to_string());
        }
        classes
    }
}
