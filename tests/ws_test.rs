//! Live-update socket against a real listener.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use attendance_dashboard::handlers;
use attendance_dashboard::store::RecordStore;
use common::*;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn start(store: &RecordStore) -> (SocketAddr, ServerHandle) {
    let state = app_state(store);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind listener");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (addr, handle)
}

async fn connect(addr: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    let req = format!(
        "GET /ws HTTP/1.1\r\nHost: {addr}\r\nUpgrade: websocket\r\nConnection: Upgrade\r\n\
         Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\nSec-WebSocket-Version: 13\r\n\r\n"
    );
    stream.write_all(req.as_bytes()).await.expect("write handshake");

    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        head.push(stream.read_u8().await.expect("read handshake"));
    }
    let head = String::from_utf8(head).expect("handshake is text");
    assert!(head.starts_with("HTTP/1.1 101"), "{head}");
    stream
}

/// Next text frame as JSON. Server frames are unmasked.
async fn read_text(stream: &mut TcpStream) -> Value {
    loop {
        let b0 = stream.read_u8().await.expect("frame header");
        let b1 = stream.read_u8().await.expect("frame length");
        let len = match b1 & 0x7f {
            126 => u64::from(stream.read_u16().await.expect("extended length")),
            127 => stream.read_u64().await.expect("extended length"),
            n => u64::from(n),
        };
        let mut payload = vec![0; len as usize];
        stream.read_exact(&mut payload).await.expect("frame payload");
        if b0 & 0x0f == 0x1 {
            return serde_json::from_slice(&payload).expect("message json");
        }
    }
}

async fn next_message(stream: &mut TcpStream) -> Value {
    tokio::time::timeout(Duration::from_secs(5), read_text(stream))
        .await
        .expect("message arrives")
}

#[actix_web::test]
async fn socket_sends_current_status_then_one_message_per_publish() {
    let store = RecordStore::new();
    let (addr, server) = start(&store).await;
    let mut ws = connect(addr).await;

    assert_eq!(
        next_message(&mut ws).await,
        json!({"type": "snapshot", "version": 0, "status": {"state": "loading"}})
    );

    store.apply_snapshot(json!({"-Nbad": "not a record"}));
    assert_eq!(
        next_message(&mut ws).await,
        json!({
            "type": "snapshot",
            "version": 1,
            "status": {"state": "error", "message": "Error loading attendance data"}
        })
    );

    store.apply_snapshot(java_java_ios());
    assert_eq!(
        next_message(&mut ws).await,
        json!({"type": "snapshot", "version": 2, "status": {"state": "normal"}})
    );

    server.stop(false).await;
}

#[actix_web::test]
async fn late_socket_starts_from_the_latest_version() {
    let store = RecordStore::new();
    store.apply_snapshot(java_java_ios());
    store.apply_snapshot(json!(null));
    let (addr, server) = start(&store).await;
    let mut ws = connect(addr).await;

    let first = next_message(&mut ws).await;
    assert_eq!(first["version"], 2);
    assert_eq!(first["status"]["state"], "normal");

    server.stop(false).await;
}
