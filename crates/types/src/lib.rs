//! Shared types module - coordinates, markers and field state
//!
//! This crate defines the fundamental types used throughout the board view.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (board model, terminal rendering, host bridge).
//!
//! # Board Dimensions
//!
//! The board is a square grid whose side length is chosen by the host when it
//! creates the board. Supported sizes:
//!
//! - **Default**: 9x9 with 3x3 sections (the classic layout)
//! - **Maximum**: 16x16 - the largest character set the host game offers
//!
//! `section_size` controls where the heavier section borders fall; the host
//! guarantees a sensible value (typically `sqrt(size)`).
//!
//! # Marker Vocabulary
//!
//! Every cell exposes a fixed vocabulary of markers that the host stylesheet
//! interprets. This vocabulary is the de-facto styling contract and must not
//! change:
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `game-field` | Present on every cell |
//! | `size-{n}` | Board side length |
//! | `xpos-{x}` / `ypos-{y}` | Cell identity |
//! | `border-right-normal` / `border-right-section` | Right border variant |
//! | `border-bottom-normal` / `border-bottom-section` | Bottom border variant |
//! | `selected` | Cell is the current selection (at most one) |
//! | `highlighted` | Cell is in the current highlight set |
//! | `word` | Cell is part of a placed word |
//! | `locked` | Cell content cannot be edited |
//!
//! # Examples
//!
//! ```
//! use board_view_types::{BorderStyle, Coord, Selection};
//!
//! let coord = Coord::new(3, 4);
//! assert_eq!(coord.xpos_class(), "xpos-3");
//!
//! let selection = Selection::Field(coord);
//! assert_eq!(selection.bridge_coords(), (3, 4));
//! assert_eq!(Selection::None.bridge_coords(), (-1, -1));
//!
//! assert_eq!(BorderStyle::Section.right_class(), "border-right-section");
//! ```

/// Default board side length (9x9, the classic layout)
pub const DEFAULT_BOARD_SIZE: u8 = 9;

/// Default section side length for the default board
pub const DEFAULT_SECTION_SIZE: u8 = 3;

/// Largest supported board side length (16x16 letter games)
pub const MAX_BOARD_SIZE: u8 = 16;

/// Upper bound on pencil marks per cell (one per character in the set)
pub const MAX_PENCIL_MARKS: usize = MAX_BOARD_SIZE as usize;

/// Coordinate sentinel reported over the bridge when the selection clears
pub const DESELECTED: i32 = -1;

/// Marker present on every cell
pub const CLASS_GAME_FIELD: &str = "game-field";

/// Marker for the currently selected cell
pub const CLASS_SELECTED: &str = "selected";

/// Marker for cells in the current highlight set
pub const CLASS_HIGHLIGHTED: &str = "highlighted";

/// Marker for cells that belong to a placed word
pub const CLASS_WORD: &str = "word";

/// Marker for cells whose content is fixed by the puzzle
pub const CLASS_LOCKED: &str = "locked";

/// Cell coordinate on the board, `0 <= x,y < size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 1-indexed layout column
    pub fn column(&self) -> u16 {
        self.x as u16 + 1
    }

    /// 1-indexed layout row
    pub fn row(&self) -> u16 {
        self.y as u16 + 1
    }

    pub fn xpos_class(&self) -> String {
        format!("xpos-{}", self.x)
    }

    pub fn ypos_class(&self) -> String {
        format!("ypos-{}", self.y)
    }
}

/// Border variant of a cell edge.
///
/// `Section` falls after every `section_size`-th column (or row) except the
/// final one, which is covered by the outer frame instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    Normal,
    Section,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Normal => "normal",
            BorderStyle::Section => "section",
        }
    }

    pub fn right_class(&self) -> &'static str {
        match self {
            BorderStyle::Normal => "border-right-normal",
            BorderStyle::Section => "border-right-section",
        }
    }

    pub fn bottom_class(&self) -> &'static str {
        match self {
            BorderStyle::Normal => "border-bottom-normal",
            BorderStyle::Section => "border-bottom-section",
        }
    }
}

/// Result of a click on the board: a newly selected cell, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Field(Coord),
    None,
}

impl Selection {
    /// Coordinates as reported to the host bridge.
    ///
    /// A cleared selection is the `(-1, -1)` sentinel.
    pub fn bridge_coords(&self) -> (i32, i32) {
        match self {
            Selection::Field(coord) => (coord.x as i32, coord.y as i32),
            Selection::None => (DESELECTED, DESELECTED),
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Selection::Field(_))
    }
}

/// Visual state pushed by the host for a single cell.
///
/// `word` collapses the host's word-id list to the only fact the view needs:
/// whether the cell belongs to a placed word. The host always pushes the full
/// board, so every cell sees a fresh one of these on each refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub coord: Coord,
    pub character: String,
    pub pencil: Vec<String>,
    pub word: bool,
    pub locked: bool,
}

impl FieldUpdate {
    /// An empty update for the given cell (blank character, no marks).
    pub fn empty(coord: Coord) -> Self {
        Self {
            coord,
            character: String::new(),
            pencil: Vec::new(),
            word: false,
            locked: false,
        }
    }
}
