//! TCP server for the host bridge
//!
//! Handles incoming host connections and manages their lifecycle.
//! Uses tokio for async networking; board operations are forwarded to the
//! UI loop over a bounded channel, replies and selection reports travel the
//! other way.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use board_view_types::{Coord, FieldUpdate};

use crate::protocol::{
    create_error, create_welcome, extract_seq_best_effort, parse_message, ErrorCode, ErrorMessage,
    ParsedMessage, PROTOCOL_VERSION,
};

/// Server configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7777,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands: 10,
        }
    }
}

impl BridgeConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("BOARD_VIEW_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("BOARD_VIEW_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7777);
        let max_pending_commands = env::var("BOARD_VIEW_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Self {
            host,
            port,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared server state
pub struct BridgeState {
    config: BridgeConfig,
    clients: Arc<RwLock<Vec<ClientHandle>>>,
}

impl BridgeState {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            clients: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Check if the bridge is disabled via environment.
    pub fn is_disabled() -> bool {
        std::env::var("BOARD_VIEW_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }
}

/// Handle to a connected host client
pub struct ClientHandle {
    pub id: usize,
    pub addr: SocketAddr,
    pub handshaken: bool,
    pub last_seq: Option<u64>,
    pub tx: mpsc::UnboundedSender<String>,
}

/// Board operation requested by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    CreateBoard { size: u8, section_size: u8 },
    UpdateFields(Vec<FieldUpdate>),
    HighlightFields(Vec<Coord>),
}

/// Command delivered to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub op: HostOp,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClient { client_id: usize, line: String },
    Broadcast { line: String },
}

async fn is_handshaken(state: &Arc<BridgeState>, client_id: usize) -> bool {
    let clients = state.clients.read().await;
    clients
        .iter()
        .find(|c| c.id == client_id)
        .map(|c| c.handshaken)
        .unwrap_or(false)
}

async fn check_and_update_seq(state: &Arc<BridgeState>, client_id: usize, seq: u64) -> bool {
    let mut clients = state.clients.write().await;
    let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
        return true;
    };

    match client.last_seq {
        None => {
            client.last_seq = Some(seq);
            true
        }
        Some(prev) => {
            if seq <= prev {
                false
            } else {
                client.last_seq = Some(seq);
                true
            }
        }
    }
}

/// Start the TCP server.
///
/// `ready_tx` reports the bound address once listening; tests bind port 0
/// and read the real port from it.
pub async fn run_server(
    config: BridgeConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    info!(address = %bound, "bridge listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(BridgeState::new(config));
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClient { client_id, line } => {
                        let clients = state.clients.read().await;
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(line);
                        }
                    }
                    OutboundMessage::Broadcast { line } => {
                        let clients = state.clients.read().await;
                        for c in clients.iter().filter(|c| c.handshaken) {
                            let _ = c.tx.send(line.clone());
                        }
                    }
                }
            }
        });
    }

    // Accept incoming connections.
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!(client_id, address = %addr, "host connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, addr, client_id, Arc::clone(&state), command_tx).await
            {
                warn!(client_id, error = %e, "client error");
            }
            let mut clients = state.clients.write().await;
            clients.retain(|c| c.id != client_id);
            info!(client_id, "host disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    state: Arc<BridgeState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    {
        let mut clients = state.clients.write().await;
        clients.push(ClientHandle {
            id: client_id,
            addr,
            handshaken: false,
            last_seq: None,
            tx: tx.clone(),
        });
    }

    // Writer task: one JSON document per line.
    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if writer.write_all(b"\n").await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let send_error = |tx: &mpsc::UnboundedSender<String>, err: ErrorMessage| {
        if let Ok(line) = serde_json::to_string(&err) {
            let _ = tx.send(line);
        }
    };

    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parsed = match parse_message(trimmed) {
            Ok(parsed) => parsed,
            Err(message) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                send_error(&tx, create_error(seq, ErrorCode::InvalidCommand, &message));
                continue;
            }
        };

        match parsed {
            ParsedMessage::Hello(hello) => {
                if !hello.protocol_version.starts_with("1.") {
                    send_error(
                        &tx,
                        create_error(
                            hello.seq,
                            ErrorCode::ProtocolMismatch,
                            &format!("protocol version {} not supported", hello.protocol_version),
                        ),
                    );
                    break;
                }

                {
                    let mut clients = state.clients.write().await;
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                    }
                }

                debug!(client_id, client = %hello.client.name, "handshake complete");
                let welcome = create_welcome(hello.seq, &state.config.protocol_version);
                if let Ok(line) = serde_json::to_string(&welcome) {
                    let _ = tx.send(line);
                }
            }

            ParsedMessage::CreateBoard(msg) => {
                let op = HostOp::CreateBoard {
                    size: msg.size,
                    section_size: msg.section_size,
                };
                forward_op(&state, client_id, msg.seq, op, &command_tx, &tx).await;
            }

            ParsedMessage::UpdateFields(msg) => {
                let updates = msg.fields.into_iter().map(FieldUpdate::from).collect();
                forward_op(
                    &state,
                    client_id,
                    msg.seq,
                    HostOp::UpdateFields(updates),
                    &command_tx,
                    &tx,
                )
                .await;
            }

            ParsedMessage::HighlightFields(msg) => {
                let coords = msg.coordinates.into_iter().map(Coord::from).collect();
                forward_op(
                    &state,
                    client_id,
                    msg.seq,
                    HostOp::HighlightFields(coords),
                    &command_tx,
                    &tx,
                )
                .await;
            }
        }
    }

    write_task.abort();
    Ok(())
}

/// Common gatekeeping for board operations: handshake, seq monotonicity,
/// backpressure. The ack is sent by the UI loop after the operation applies.
async fn forward_op(
    state: &Arc<BridgeState>,
    client_id: usize,
    seq: u64,
    op: HostOp,
    command_tx: &mpsc::Sender<InboundCommand>,
    tx: &mpsc::UnboundedSender<String>,
) {
    let send_error = |err: ErrorMessage| {
        if let Ok(line) = serde_json::to_string(&err) {
            let _ = tx.send(line);
        }
    };

    if !is_handshaken(state, client_id).await {
        send_error(create_error(
            seq,
            ErrorCode::HandshakeRequired,
            "send hello before board operations",
        ));
        return;
    }

    if !check_and_update_seq(state, client_id, seq).await {
        send_error(create_error(
            seq,
            ErrorCode::InvalidCommand,
            "seq must be strictly increasing",
        ));
        return;
    }

    debug!(client_id, seq, ?op, "board operation");
    if command_tx
        .try_send(InboundCommand { client_id, seq, op })
        .is_err()
    {
        send_error(create_error(
            seq,
            ErrorCode::Backpressure,
            "command queue is full",
        ));
    }
}
