//! Bridge runtime integration.
//!
//! Bridges the sync UI loop with the async TCP server.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::server::{run_server, BridgeConfig, BridgeState, InboundCommand, OutboundMessage};

/// Running bridge instance.
///
/// Owns the tokio runtime so the server lives exactly as long as the view.
pub struct Bridge {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    endpoint: String,
}

impl Bridge {
    /// Start the bridge from environment variables.
    ///
    /// Returns None if `BOARD_VIEW_DISABLED` is set or the runtime cannot be
    /// created.
    pub fn start_from_env() -> Option<Self> {
        if BridgeState::is_disabled() {
            return None;
        }
        Self::start(BridgeConfig::from_env())
    }

    pub fn start(config: BridgeConfig) -> Option<Self> {
        let endpoint = config.endpoint();
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();

        let rt = Runtime::new().ok()?;
        rt.spawn(async move {
            let _ = run_server(config, cmd_tx, out_rx, None).await;
        });

        Some(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }
}
