//! Board view (workspace facade crate).
//!
//! This package keeps the `board_view::{core,bridge,term,types}` public API
//! stable while the implementation lives in dedicated crates under `crates/`.

pub use board_view_bridge as bridge;
pub use board_view_core as core;
pub use board_view_term as term;
pub use board_view_types as types;
