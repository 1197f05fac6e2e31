//! Bridge end-to-end tests - a raw TCP client playing host

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use board_view::bridge::{
    create_ack, create_field_selected, create_hello, run_server, BridgeConfig, HostOp,
    InboundCommand, OutboundMessage,
};
use board_view::types::Coord;

fn test_config() -> BridgeConfig {
    BridgeConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        protocol_version: "1.0.0".to_string(),
        max_pending_commands: 8,
    }
}

async fn next_line(lines: &mut tokio::io::Lines<BufReader<tokio::net::tcp::OwnedReadHalf>>) -> serde_json::Value {
    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .expect("timed out waiting for line")
        .expect("read failed")
        .expect("connection closed");
    serde_json::from_str(&line).expect("line is not JSON")
}

#[tokio::test]
async fn bridge_hello_create_board_ack_and_selection_broadcast() {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<InboundCommand>(8);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        let _ = run_server(test_config(), cmd_tx, out_rx, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // hello -> welcome
    let hello = create_hello(1, "e2e-host", "1.0.0");
    let line = serde_json::to_string(&hello).unwrap();
    write_half.write_all(line.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();

    let welcome = next_line(&mut lines).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["seq"], 1);

    // createBoard reaches the UI loop.
    let cmd = r#"{"type":"createBoard","seq":2,"ts":1,"size":9,"sectionSize":3}"#;
    write_half.write_all(cmd.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();

    let inbound = tokio::time::timeout(Duration::from_secs(2), cmd_rx.recv())
        .await
        .unwrap()
        .expect("expected inbound command");
    assert_eq!(inbound.seq, 2);
    assert_eq!(
        inbound.op,
        HostOp::CreateBoard {
            size: 9,
            section_size: 3
        }
    );

    // Ack after apply.
    out_tx
        .send(OutboundMessage::ToClient {
            client_id: inbound.client_id,
            line: serde_json::to_string(&create_ack(2)).unwrap(),
        })
        .unwrap();

    let ack = next_line(&mut lines).await;
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["seq"], 2);
    assert_eq!(ack["status"], "ok");

    // highlightFields conversion.
    let cmd = r#"{"type":"highlightFields","seq":3,"ts":1,"coordinates":[{"xPos":1,"yPos":1},{"xPos":2,"yPos":2}]}"#;
    write_half.write_all(cmd.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();

    let inbound = tokio::time::timeout(Duration::from_secs(2), cmd_rx.recv())
        .await
        .unwrap()
        .expect("expected inbound command");
    assert_eq!(
        inbound.op,
        HostOp::HighlightFields(vec![Coord::new(1, 1), Coord::new(2, 2)])
    );

    // Selection reports are broadcast.
    let report = create_field_selected(1, 4, 7);
    out_tx
        .send(OutboundMessage::Broadcast {
            line: serde_json::to_string(&report).unwrap(),
        })
        .unwrap();

    let selected = next_line(&mut lines).await;
    assert_eq!(selected["type"], "fieldSelected");
    assert_eq!(selected["xPos"], 4);
    assert_eq!(selected["yPos"], 7);

    server_handle.abort();
}

#[tokio::test]
async fn bridge_update_fields_collapses_words_to_the_word_flag() {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<InboundCommand>(8);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();
    let _keep_out_tx = out_tx;

    let server_handle = tokio::spawn(async move {
        let _ = run_server(test_config(), cmd_tx, out_rx, Some(ready_tx)).await;
    });
    let addr = ready_rx.await.expect("ready channel dropped");

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let hello = serde_json::to_string(&create_hello(1, "e2e-host", "1.0.0")).unwrap();
    write_half.write_all(hello.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    let welcome = next_line(&mut lines).await;
    assert_eq!(welcome["type"], "welcome");

    let cmd = r#"{"type":"updateFields","seq":2,"ts":1,"fields":[{"xPos":0,"yPos":1,"character":"A","pencil":["1"],"words":[5],"locked":true}]}"#;
    write_half.write_all(cmd.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();

    let inbound = tokio::time::timeout(Duration::from_secs(2), cmd_rx.recv())
        .await
        .unwrap()
        .expect("expected inbound command");
    match inbound.op {
        HostOp::UpdateFields(updates) => {
            assert_eq!(updates.len(), 1);
            assert_eq!(updates[0].coord, Coord::new(0, 1));
            assert_eq!(updates[0].character, "A");
            assert_eq!(updates[0].pencil, vec!["1".to_string()]);
            assert!(updates[0].word);
            assert!(updates[0].locked);
        }
        other => panic!("unexpected op: {:?}", other),
    }

    server_handle.abort();
}

#[tokio::test]
async fn bridge_rejects_operations_before_hello_and_stale_seq() {
    let (cmd_tx, _cmd_rx) = mpsc::channel::<InboundCommand>(8);
    let (_out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        let _ = run_server(test_config(), cmd_tx, out_rx, Some(ready_tx)).await;
    });
    let addr = ready_rx.await.expect("ready channel dropped");

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Operation before hello.
    let cmd = r#"{"type":"createBoard","seq":1,"ts":1,"size":9,"sectionSize":3}"#;
    write_half.write_all(cmd.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();

    let error = next_line(&mut lines).await;
    assert_eq!(error["type"], "error");
    assert_eq!(error["code"], "handshake_required");

    // Handshake, then a stale seq.
    let hello = serde_json::to_string(&create_hello(5, "e2e-host", "1.0.0")).unwrap();
    write_half.write_all(hello.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    let welcome = next_line(&mut lines).await;
    assert_eq!(welcome["type"], "welcome");

    let cmd = r#"{"type":"createBoard","seq":5,"ts":1,"size":9,"sectionSize":3}"#;
    write_half.write_all(cmd.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();

    let error = next_line(&mut lines).await;
    assert_eq!(error["type"], "error");
    assert_eq!(error["code"], "invalid_command");

    server_handle.abort();
}
