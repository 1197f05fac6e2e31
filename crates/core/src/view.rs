//! BoardView - the host-facing surface of the board model.
//!
//! The host drives the view through three operations (create, update,
//! highlight); the user drives it through [`BoardView::select_field`]. The
//! view itself never initiates anything except the single outbound selection
//! notification.
//!
//! Operations arriving before the host signals readiness are queued and run
//! in arrival order once [`BoardView::set_ready`] fires. This replaces the
//! load-order race the embedded view used to paper over with fixed-delay
//! retries: the host resolves readiness exactly once, and nothing is lost or
//! retried.

use std::collections::VecDeque;

use board_view_types::{Coord, FieldUpdate, Selection};

use crate::board::Board;
use crate::error::BoardError;
use crate::notifier::Notifier;

/// Host operation deferred until readiness.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingOp {
    CreateBoard { size: u8, section_size: u8 },
    UpdateFields(Vec<FieldUpdate>),
    HighlightFields(Vec<Coord>),
}

/// Stateless-between-calls renderer model for the puzzle grid.
///
/// Owns the grid as plain data; the live visual tree (terminal framebuffer,
/// DOM, whatever the embedding uses) is a derived projection kept in sync by
/// re-rendering after each operation.
#[derive(Debug)]
pub struct BoardView<N: Notifier> {
    board: Option<Board>,
    ready: bool,
    pending: VecDeque<PendingOp>,
    notifier: N,
}

impl<N: Notifier> BoardView<N> {
    /// A view that is not yet ready: host operations queue until
    /// [`BoardView::set_ready`].
    pub fn new(notifier: N) -> Self {
        Self {
            board: None,
            ready: false,
            pending: VecDeque::new(),
            notifier,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn selected(&self) -> Option<Coord> {
        self.board.as_ref().and_then(|board| board.selected())
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mark the view ready and drain queued operations in arrival order.
    ///
    /// The host resolves readiness exactly once; a second call is an error.
    /// Draining fails fast: the first failing operation aborts the drain and
    /// discards the remainder of the queue.
    pub fn set_ready(&mut self) -> Result<(), BoardError> {
        if self.ready {
            return Err(BoardError::AlreadyReady);
        }
        self.ready = true;

        while let Some(op) = self.pending.pop_front() {
            let result = match op {
                PendingOp::CreateBoard { size, section_size } => {
                    self.apply_create(size, section_size)
                }
                PendingOp::UpdateFields(updates) => self.apply_updates(&updates),
                PendingOp::HighlightFields(coords) => self.apply_highlights(&coords),
            };
            if let Err(err) = result {
                self.pending.clear();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Build (or fully rebuild) the grid.
    ///
    /// Any existing board is discarded first, including selection, highlight
    /// and content markers; nothing survives a rebuild.
    pub fn create_board(&mut self, size: u8, section_size: u8) -> Result<(), BoardError> {
        if !self.ready {
            self.pending
                .push_back(PendingOp::CreateBoard { size, section_size });
            return Ok(());
        }
        self.apply_create(size, section_size)
    }

    /// Repaint cell contents from a batch of host updates.
    ///
    /// The host always sends the full board (a total refresh, not a delta),
    /// but cells missing from the batch are simply left untouched. The batch
    /// is validated up front: an unknown coordinate fails the whole call
    /// before any cell changes.
    pub fn update_fields(&mut self, updates: Vec<FieldUpdate>) -> Result<(), BoardError> {
        if !self.ready {
            self.pending.push_back(PendingOp::UpdateFields(updates));
            return Ok(());
        }
        self.apply_updates(&updates)
    }

    /// Replace the highlighted set.
    ///
    /// Every previously highlighted cell is cleared first; an empty input
    /// therefore clears all highlights. Validated up front like
    /// [`BoardView::update_fields`].
    pub fn highlight_fields(&mut self, coords: Vec<Coord>) -> Result<(), BoardError> {
        if !self.ready {
            self.pending.push_back(PendingOp::HighlightFields(coords));
            return Ok(());
        }
        self.apply_highlights(&coords)
    }

    /// Toggle selection of the clicked cell and notify the host.
    ///
    /// At most one cell is ever selected. Clicking an unselected cell moves
    /// the selection there and reports its coordinate; clicking the selected
    /// cell clears the selection and reports `(-1, -1)`.
    pub fn select_field(&mut self, coord: Coord) -> Result<Selection, BoardError> {
        let board = self.board.as_mut().ok_or(BoardError::BoardNotCreated)?;
        let was_selected = board.get(coord)?.is_selected();

        for cell in board.cells_mut() {
            cell.set_selected(false);
        }

        let selection = if was_selected {
            Selection::None
        } else {
            board.get_mut(coord)?.set_selected(true);
            Selection::Field(coord)
        };

        let (x, y) = selection.bridge_coords();
        self.notifier.on_field_selected(x, y);
        Ok(selection)
    }

    fn apply_create(&mut self, size: u8, section_size: u8) -> Result<(), BoardError> {
        self.board = Some(Board::new(size, section_size)?);
        Ok(())
    }

    fn apply_updates(&mut self, updates: &[FieldUpdate]) -> Result<(), BoardError> {
        let board = self.board.as_mut().ok_or(BoardError::BoardNotCreated)?;
        for update in updates {
            board.get(update.coord)?;
        }
        for update in updates {
            board.get_mut(update.coord)?.apply(update.clone());
        }
        Ok(())
    }

    fn apply_highlights(&mut self, coords: &[Coord]) -> Result<(), BoardError> {
        let board = self.board.as_mut().ok_or(BoardError::BoardNotCreated)?;
        for &coord in coords {
            board.get(coord)?;
        }
        for cell in board.cells_mut() {
            cell.set_highlighted(false);
        }
        for &coord in coords {
            board.get_mut(coord)?.set_highlighted(true);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NullNotifier;

    #[test]
    fn operations_queue_until_ready() {
        let mut view = BoardView::new(NullNotifier);
        assert!(!view.is_ready());

        view.create_board(4, 2).unwrap();
        view.update_fields(vec![FieldUpdate {
            coord: Coord::new(1, 1),
            character: "A".to_string(),
            pencil: Vec::new(),
            word: false,
            locked: false,
        }])
        .unwrap();
        assert!(view.board().is_none());

        view.set_ready().unwrap();
        let board = view.board().expect("board built on ready");
        assert_eq!(board.get(Coord::new(1, 1)).unwrap().character(), "A");
    }

    #[test]
    fn set_ready_twice_is_an_error() {
        let mut view = BoardView::new(NullNotifier);
        view.set_ready().unwrap();
        assert_eq!(view.set_ready().unwrap_err(), BoardError::AlreadyReady);
    }

    #[test]
    fn failed_drain_discards_the_rest_of_the_queue() {
        let mut view = BoardView::new(NullNotifier);
        // Updating before any board exists fails during the drain.
        view.update_fields(Vec::new()).unwrap();
        view.create_board(4, 2).unwrap();

        assert_eq!(view.set_ready().unwrap_err(), BoardError::BoardNotCreated);
        assert!(view.board().is_none());
    }

    #[test]
    fn bad_update_leaves_all_cells_untouched() {
        let mut view = BoardView::new(NullNotifier);
        view.set_ready().unwrap();
        view.create_board(4, 2).unwrap();

        let good = FieldUpdate {
            coord: Coord::new(0, 0),
            character: "A".to_string(),
            pencil: Vec::new(),
            word: false,
            locked: false,
        };
        let bad = FieldUpdate::empty(Coord::new(9, 9));
        let err = view.update_fields(vec![good, bad]).unwrap_err();
        assert_eq!(err, BoardError::CellNotFound { x: 9, y: 9 });

        let board = view.board().unwrap();
        assert_eq!(board.get(Coord::new(0, 0)).unwrap().character(), "");
    }
}
