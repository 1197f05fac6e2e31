//! BoardScreen: maps `core::Board` into a terminal framebuffer.
//!
//! This module is pure (no I/O). The board model is the source of truth and
//! the framebuffer is a derived projection, rebuilt after every operation.
//! It also answers the inverse question: which cell sits under a given
//! terminal position (mouse hit-testing).

use board_view_core::{Board, Cell};
use board_view_types::{BorderStyle, Coord};

use crate::fb::{FrameBuffer, Rgb, Style};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Bridge state shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeStatusView {
    pub enabled: bool,
    pub endpoint: String,
}

/// A lightweight terminal renderer for the puzzle board.
///
/// Each cell is a `cell_w x cell_h` box of interior space: the committed
/// character centers on the first interior row, pencil marks fill the second.
/// Grid lines between cells take their weight from the cell border markers
/// (heavy for section boundaries), with a heavy outer frame.
pub struct BoardScreen {
    /// Cell interior width in terminal columns.
    cell_w: u16,
    /// Cell interior height in terminal rows.
    cell_h: u16,
}

impl Default for BoardScreen {
    fn default() -> Self {
        // 5x2 leaves room for a centered character plus a pencil row.
        Self {
            cell_w: 5,
            cell_h: 2,
        }
    }
}

const GRID_NORMAL: Style = Style {
    fg: Rgb::new(90, 90, 100),
    bg: Rgb::new(16, 16, 20),
    bold: false,
    dim: false,
};

const GRID_SECTION: Style = Style {
    fg: Rgb::new(220, 220, 220),
    bg: Rgb::new(16, 16, 20),
    bold: false,
    dim: false,
};

const BG_HIGHLIGHTED: Rgb = Rgb::new(96, 76, 16);
const BG_SELECTED: Rgb = Rgb::new(28, 60, 120);
const FG_WORD: Rgb = Rgb::new(110, 200, 130);
const FG_CHARACTER: Rgb = Rgb::new(230, 230, 230);
const FG_PENCIL: Rgb = Rgb::new(150, 150, 160);

impl BoardScreen {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Total framebuffer footprint of a `size`-wide board, grid lines
    /// included.
    pub fn footprint(&self, size: u8) -> (u16, u16) {
        let w = size as u16 * (self.cell_w + 1) + 1;
        let h = size as u16 * (self.cell_h + 1) + 1;
        (w, h)
    }

    /// Top-left corner of the board frame, centered in the viewport but kept
    /// clear of the status line. Hit-testing relies on the exact same math.
    fn origin(&self, size: u8, viewport: Viewport) -> (u16, u16) {
        let (w, h) = self.footprint(size);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = (viewport.height.saturating_sub(h) / 2).max(1);
        (x, y)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        board: Option<&Board>,
        bridge: Option<&BridgeStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        self.draw_status_line(bridge, fb);

        let Some(board) = board else {
            let msg = "waiting for host...";
            let x = viewport.width.saturating_sub(msg.len() as u16) / 2;
            fb.put_str(x, viewport.height / 2, msg, Style::default());
            return;
        };

        let size = board.size();
        let (ox, oy) = self.origin(size, viewport);

        self.draw_grid(board, ox, oy, fb);
        for cell in board.cells() {
            self.draw_cell(cell, ox, oy, fb);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        board: Option<&Board>,
        bridge: Option<&BridgeStatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, bridge, viewport, &mut fb);
        fb
    }

    /// Map a terminal position to the cell under it.
    ///
    /// Grid lines and anything outside the board resolve to `None`; clicks
    /// land on exactly the cell whose interior contains them, sub-area
    /// (character or pencil row) notwithstanding.
    pub fn hit_test(&self, size: u8, viewport: Viewport, col: u16, row: u16) -> Option<Coord> {
        let (ox, oy) = self.origin(size, viewport);
        let rel_x = col.checked_sub(ox)?;
        let rel_y = row.checked_sub(oy)?;

        let step_x = self.cell_w + 1;
        let step_y = self.cell_h + 1;
        if rel_x % step_x == 0 || rel_y % step_y == 0 {
            return None;
        }

        let x = rel_x / step_x;
        let y = rel_y / step_y;
        if x >= size as u16 || y >= size as u16 {
            return None;
        }
        Some(Coord::new(x as u8, y as u8))
    }

    fn draw_status_line(&self, bridge: Option<&BridgeStatusView>, fb: &mut FrameBuffer) {
        let dim = Style {
            dim: true,
            ..Style::default()
        };
        let text = match bridge {
            Some(status) if status.enabled => format!("bridge: {}", status.endpoint),
            Some(_) => "bridge: disabled".to_string(),
            None => "bridge: off".to_string(),
        };
        fb.put_str(0, 0, &text, dim);
    }

    fn draw_grid(&self, board: &Board, ox: u16, oy: u16, fb: &mut FrameBuffer) {
        let size = board.size();
        let (w, h) = self.footprint(size);
        let step_x = self.cell_w + 1;
        let step_y = self.cell_h + 1;

        // Horizontal lines first, vertical lines after so crossings read as
        // vertical glyphs.
        for i in 0..=size as u16 {
            let y = oy + i * step_y;
            let style = self.horizontal_style(board, i);
            let ch = if style == GRID_SECTION { '━' } else { '─' };
            for x in ox..ox + w {
                fb.put_char(x, y, ch, style);
            }
        }
        for i in 0..=size as u16 {
            let x = ox + i * step_x;
            let style = self.vertical_style(board, i);
            let ch = if style == GRID_SECTION { '┃' } else { '│' };
            for y in oy..oy + h {
                fb.put_char(x, y, ch, style);
            }
        }
    }

    /// Style of the vertical line at grid index `i` (after column `i - 1`).
    fn vertical_style(&self, board: &Board, i: u16) -> Style {
        let size = board.size() as u16;
        if i == 0 || i == size {
            return GRID_SECTION;
        }
        let left = Coord::new((i - 1) as u8, 0);
        match board.get(left).map(|cell| cell.border_right()) {
            Ok(BorderStyle::Section) => GRID_SECTION,
            _ => GRID_NORMAL,
        }
    }

    fn horizontal_style(&self, board: &Board, i: u16) -> Style {
        let size = board.size() as u16;
        if i == 0 || i == size {
            return GRID_SECTION;
        }
        let above = Coord::new(0, (i - 1) as u8);
        match board.get(above).map(|cell| cell.border_bottom()) {
            Ok(BorderStyle::Section) => GRID_SECTION,
            _ => GRID_NORMAL,
        }
    }

    fn draw_cell(&self, cell: &Cell, ox: u16, oy: u16, fb: &mut FrameBuffer) {
        let coord = cell.coord();
        let x0 = ox + coord.x as u16 * (self.cell_w + 1) + 1;
        let y0 = oy + coord.y as u16 * (self.cell_h + 1) + 1;

        let bg = if cell.is_selected() {
            BG_SELECTED
        } else if cell.is_highlighted() {
            BG_HIGHLIGHTED
        } else {
            Style::default().bg
        };

        let fill = Style {
            bg,
            ..Style::default()
        };
        fb.fill_rect(x0, y0, self.cell_w, self.cell_h, ' ', fill);

        let character = cell.character();
        if !character.is_empty() {
            let fg = if cell.is_word() { FG_WORD } else { FG_CHARACTER };
            let style = Style {
                fg,
                bg,
                bold: cell.is_locked(),
                dim: false,
            };
            let len = character.chars().count().min(self.cell_w as usize) as u16;
            let cx = x0 + (self.cell_w - len) / 2;
            fb.put_str(cx, y0, character, style);
        }

        if self.cell_h > 1 {
            let pencil = cell.pencil_text();
            if !pencil.is_empty() {
                let style = Style {
                    fg: FG_PENCIL,
                    bg,
                    bold: false,
                    dim: true,
                };
                let trimmed: String = pencil
                    .trim_start()
                    .chars()
                    .take(self.cell_w as usize)
                    .collect();
                fb.put_str(x0, y0 + 1, &trimmed, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_accounts_for_grid_lines() {
        let screen = BoardScreen::default();
        assert_eq!(screen.footprint(9), (9 * 6 + 1, 9 * 3 + 1));
    }

    #[test]
    fn hit_test_rejects_grid_lines() {
        let screen = BoardScreen::default();
        let viewport = Viewport::new(200, 80);
        let (ox, oy) = screen.origin(4, viewport);

        assert_eq!(screen.hit_test(4, viewport, ox, oy), None);
        assert_eq!(
            screen.hit_test(4, viewport, ox + 1, oy + 1),
            Some(Coord::new(0, 0))
        );
    }
}
