//! Terminal rendering module.
//!
//! This is the visual half of the view: it projects the board model into a
//! simple framebuffer and flushes that to a terminal backend. The model owns
//! all state; this layer derives its output from it after each operation and
//! maps mouse positions back onto cell coordinates.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render the marker vocabulary (selected/highlighted/word/locked and the
//!   border variants) as visual styling without the model knowing about it

pub mod board_screen;
pub mod fb;
pub mod renderer;

pub use board_view_core as core;
pub use board_view_types as types;

pub use board_screen::{BoardScreen, BridgeStatusView, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::TerminalRenderer;
