//! Terminal board viewer (default binary).
//!
//! Renders the puzzle board in a terminal and connects it to a host over the
//! TCP bridge: the host pushes board state in, mouse clicks report field
//! selection back out.

use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use tracing_subscriber::EnvFilter;

use board_view::bridge::{
    create_ack, create_error, create_field_selected, Bridge, ErrorCode, HostOp, OutboundMessage,
};
use board_view::core::{BoardView, Notifier};
use board_view::term::{BoardScreen, BridgeStatusView, TerminalRenderer, Viewport};
use board_view::types::{DEFAULT_BOARD_SIZE, DEFAULT_SECTION_SIZE};

/// Forwards selection reports from the view into the main loop, which puts
/// them on the wire.
struct SelectionSender(mpsc::Sender<(i32, i32)>);

impl Notifier for SelectionSender {
    fn on_field_selected(&mut self, x: i32, y: i32) {
        let _ = self.0.send((x, y));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut bridge = Bridge::start_from_env();
    match bridge.as_ref() {
        Some(bridge) => tracing::info!(endpoint = bridge.endpoint(), "bridge started"),
        None => tracing::info!("bridge disabled"),
    }
    let status = BridgeStatusView {
        enabled: bridge.is_some(),
        endpoint: bridge
            .as_ref()
            .map(|b| b.endpoint().to_string())
            .unwrap_or_default(),
    };

    let (selection_tx, selection_rx) = mpsc::channel::<(i32, i32)>();
    let mut view = BoardView::new(SelectionSender(selection_tx));
    // The terminal is up, so the "document" is ready before the host can
    // push anything.
    view.set_ready()?;
    view.create_board(DEFAULT_BOARD_SIZE, DEFAULT_SECTION_SIZE)?;

    let screen = BoardScreen::default();
    let mut outbound_seq: u64 = 0;

    loop {
        // Apply pending host operations, acking each one.
        if let Some(bridge) = bridge.as_mut() {
            while let Some(cmd) = bridge.try_recv() {
                let result = match cmd.op {
                    HostOp::CreateBoard { size, section_size } => {
                        view.create_board(size, section_size)
                    }
                    HostOp::UpdateFields(updates) => view.update_fields(updates),
                    HostOp::HighlightFields(coords) => view.highlight_fields(coords),
                };
                let reply = match result {
                    Ok(()) => serde_json::to_string(&create_ack(cmd.seq))?,
                    Err(err) => serde_json::to_string(&create_error(
                        cmd.seq,
                        ErrorCode::BoardFault,
                        &err.to_string(),
                    ))?,
                };
                bridge.send(OutboundMessage::ToClient {
                    client_id: cmd.client_id,
                    line: reply,
                });
            }
        }

        // Report selections made since the last pass.
        while let Ok((x, y)) = selection_rx.try_recv() {
            outbound_seq += 1;
            let msg = create_field_selected(outbound_seq, x, y);
            if let Some(bridge) = bridge.as_ref() {
                bridge.send(OutboundMessage::Broadcast {
                    line: serde_json::to_string(&msg)?,
                });
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let fb = screen.render(view.board(), Some(&status), viewport);
        term.draw(&fb)?;

        // Input.
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let hit = view.board().and_then(|board| {
                            screen.hit_test(board.size(), viewport, mouse.column, mouse.row)
                        });
                        if let Some(coord) = hit {
                            view.select_field(coord)?;
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
    }
}
