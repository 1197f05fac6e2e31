//! Host bridge module - board control via TCP socket with JSON protocol
//!
//! This module connects the view to its host application. The host pushes
//! board state in; the view reports field selection out. The protocol is a
//! **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Host connects to the TCP socket (default: 127.0.0.1:7777)
//! 2. **Handshake**: Host sends `hello`, view responds with `welcome`
//! 3. **Board operations**: Host sends `createBoard`, `updateFields`,
//!    `highlightFields`; the view acks each after applying it
//! 4. **Selection reports**: The view broadcasts `fieldSelected` whenever the
//!    user selects or deselects a cell
//!
//! # Message Types
//!
//! ## Host → View
//!
//! - **hello**: Initial handshake with client info and protocol version
//! - **createBoard**: Build (or rebuild) the grid
//! - **updateFields**: Repaint cell contents - always the full board
//! - **highlightFields**: Replace the highlighted set
//!
//! ## View → Host
//!
//! - **welcome**: Response to hello
//! - **ack**: Operation applied
//! - **error**: Error response with code and message (bad JSON, stale seq,
//!   unknown coordinate, backpressure)
//! - **fieldSelected**: Cell (x, y) selected, or `(-1, -1)` cleared
//!
//! # Environment Variables
//!
//! - `BOARD_VIEW_HOST`: Bind address (default: "127.0.0.1")
//! - `BOARD_VIEW_PORT`: Port number (default: 7777)
//! - `BOARD_VIEW_MAX_PENDING`: Bound of the inbound operation queue
//! - `BOARD_VIEW_DISABLED`: Set to "1" or "true" to disable the bridge
//!
//! # Example Protocol Flow
//!
//! ```text
//! Host -> View: {"type":"hello","seq":1,"ts":1,"client":{"name":"host","version":"1.0.0"},"protocol_version":"1.0.0"}
//! View -> Host: {"type":"welcome","seq":1,"ts":2,"protocol_version":"1.0.0"}
//! Host -> View: {"type":"createBoard","seq":2,"ts":3,"size":9,"sectionSize":3}
//! View -> Host: {"type":"ack","seq":2,"ts":4,"status":"ok"}
//! Host -> View: {"type":"updateFields","seq":3,"ts":5,"fields":[{"xPos":0,"yPos":0,"character":"A","pencil":[],"words":[],"locked":true}]}
//! View -> Host: {"type":"ack","seq":3,"ts":6,"status":"ok"}
//! View -> Host: {"type":"fieldSelected","seq":1,"ts":7,"xPos":4,"yPos":7}
//! ```
//!
//! # Testing
//!
//! Connect with netcat for manual testing:
//!
//! ```bash
//! nc 127.0.0.1 7777
//! {"type":"hello","seq":1,"ts":1,"client":{"name":"test","version":"1.0.0"},"protocol_version":"1.0.0"}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use board_view_core as core;
pub use board_view_types as types;

pub use protocol::*;
pub use runtime::Bridge;
pub use server::{
    run_server, BridgeConfig, BridgeState, HostOp, InboundCommand, OutboundMessage,
};
