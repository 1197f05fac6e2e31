//! Board model - the grid and its host-driven operations
//!
//! This crate is the logic half of the view: it owns the grid as an explicit
//! in-memory container of [`Cell`] records and applies the three host-driven
//! operations (create, update, highlight) plus user selection to it. It is
//! pure data manipulation - no I/O, no rendering - so every behavior can be
//! unit-tested without a rendered environment.
//!
//! Rendering layers treat the board as the single source of truth and derive
//! their output from it after each operation.

pub mod board;
pub mod cell;
pub mod error;
pub mod notifier;
pub mod view;

pub use board_view_types as types;

pub use board::Board;
pub use cell::Cell;
pub use error::BoardError;
pub use notifier::{Notifier, NullNotifier};
pub use view::BoardView;
