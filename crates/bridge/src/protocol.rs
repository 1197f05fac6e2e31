//! Protocol module - JSON message types for the host bridge
//!
//! Implements the line-delimited JSON protocol the host speaks to the view.
//! All messages have: type, seq (sequence number), ts (timestamp in ms).
//! Payload field names (`xPos`, `sectionSize`, ...) match the JSON the host
//! already serializes for its board fields.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use board_view_types::{Coord, FieldUpdate};

/// Protocol version spoken by this view.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Milliseconds since the epoch, for message timestamps.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============== Host -> View Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelloType {
    #[serde(rename = "hello")]
    Hello,
}

impl Default for HelloType {
    fn default() -> Self {
        Self::Hello
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreateBoardType {
    #[serde(rename = "createBoard")]
    CreateBoard,
}

impl Default for CreateBoardType {
    fn default() -> Self {
        Self::CreateBoard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateFieldsType {
    #[serde(rename = "updateFields")]
    UpdateFields,
}

impl Default for UpdateFieldsType {
    fn default() -> Self {
        Self::UpdateFields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightFieldsType {
    #[serde(rename = "highlightFields")]
    HighlightFields,
}

impl Default for HighlightFieldsType {
    fn default() -> Self {
        Self::HighlightFields
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Host hello message (first message to establish the connection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
}

/// Build the grid (operation `initialize`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CreateBoardType,
    pub seq: u64,
    pub ts: u64,
    pub size: u8,
    #[serde(rename = "sectionSize")]
    pub section_size: u8,
}

/// Wire form of one cell's visual state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(rename = "xPos")]
    pub x_pos: u8,
    #[serde(rename = "yPos")]
    pub y_pos: u8,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub pencil: Vec<String>,
    #[serde(default)]
    pub words: Vec<i64>,
    #[serde(default)]
    pub locked: bool,
}

impl From<FieldState> for FieldUpdate {
    fn from(state: FieldState) -> Self {
        FieldUpdate {
            coord: Coord::new(state.x_pos, state.y_pos),
            character: state.character,
            pencil: state.pencil,
            // The view only styles word membership; the ids stay with the host.
            word: !state.words.is_empty(),
            locked: state.locked,
        }
    }
}

/// Repaint cell contents (operation `applyCharacterUpdates`). The host always
/// sends the full board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFieldsMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: UpdateFieldsType,
    pub seq: u64,
    pub ts: u64,
    pub fields: Vec<FieldState>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinatePair {
    #[serde(rename = "xPos")]
    pub x_pos: u8,
    #[serde(rename = "yPos")]
    pub y_pos: u8,
}

impl From<CoordinatePair> for Coord {
    fn from(pair: CoordinatePair) -> Self {
        Coord::new(pair.x_pos, pair.y_pos)
    }
}

/// Replace the highlighted set (operation `setHighlights`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightFieldsMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HighlightFieldsType,
    pub seq: u64,
    pub ts: u64,
    pub coordinates: Vec<CoordinatePair>,
}

// ============== View -> Host Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

impl Default for WelcomeType {
    fn default() -> Self {
        Self::Welcome
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

impl Default for AckType {
    fn default() -> Self {
        Self::Ack
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

impl Default for ErrorType {
    fn default() -> Self {
        Self::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSelectedType {
    #[serde(rename = "fieldSelected")]
    FieldSelected,
}

impl Default for FieldSelectedType {
    fn default() -> Self {
        Self::FieldSelected
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "backpressure")]
    Backpressure,
    #[serde(rename = "board_fault")]
    BoardFault,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// The single outbound bridge call: cell (x, y) newly selected, `(-1, -1)`
/// when the selection clears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSelectedMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: FieldSelectedType,
    pub seq: u64,
    pub ts: u64,
    #[serde(rename = "xPos")]
    pub x_pos: i32,
    #[serde(rename = "yPos")]
    pub y_pos: i32,
}

// ============== Constructors ==============

pub fn create_hello(seq: u64, name: &str, version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: now_ms(),
        client: ClientInfo {
            name: name.to_string(),
            version: version.to_string(),
        },
        protocol_version: PROTOCOL_VERSION.to_string(),
    }
}

pub fn create_welcome(seq: u64, protocol_version: &str) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: now_ms(),
        protocol_version: protocol_version.to_string(),
    }
}

pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: now_ms(),
        status: "ok".to_string(),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: now_ms(),
        code,
        message: message.to_string(),
    }
}

pub fn create_field_selected(seq: u64, x: i32, y: i32) -> FieldSelectedMessage {
    FieldSelectedMessage {
        msg_type: FieldSelectedType::FieldSelected,
        seq,
        ts: now_ms(),
        x_pos: x,
        y_pos: y,
    }
}

// ============== Parsing ==============

/// A parsed host message.
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    CreateBoard(CreateBoardMessage),
    UpdateFields(UpdateFieldsMessage),
    HighlightFields(HighlightFieldsMessage),
}

/// Parse one line from the host.
pub fn parse_message(line: &str) -> Result<ParsedMessage, String> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| format!("invalid JSON: {}", e))?;

    let msg_type = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| "missing type field".to_string())?;

    match msg_type {
        "hello" => serde_json::from_value(value)
            .map(ParsedMessage::Hello)
            .map_err(|e| format!("invalid hello: {}", e)),
        "createBoard" => serde_json::from_value(value)
            .map(ParsedMessage::CreateBoard)
            .map_err(|e| format!("invalid createBoard: {}", e)),
        "updateFields" => serde_json::from_value(value)
            .map(ParsedMessage::UpdateFields)
            .map_err(|e| format!("invalid updateFields: {}", e)),
        "highlightFields" => serde_json::from_value(value)
            .map(ParsedMessage::HighlightFields)
            .map_err(|e| format!("invalid highlightFields: {}", e)),
        other => Err(format!("unknown message type: {}", other)),
    }
}

/// Pull a `seq` out of a line that failed to parse, so error replies can
/// still reference it.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let mut end = 0usize;
    for b in rest.as_bytes() {
        if b.is_ascii_digit() {
            end += 1;
        } else {
            break;
        }
    }
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}
