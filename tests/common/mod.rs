//! MCP providers and fixtures used by the integration tests.

#![allow(dead_code)]

mod calculator;

use std::path::{Path, PathBuf};

pub use calculator::{Calculator, MARKER_ENV};
use mcp_skill::session::McpSession;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use serde_json::{json, Value};

/// Connect a client session to a fresh [`Calculator`] over an in-memory pipe.
pub async fn connect_in_process() -> McpSession {
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        if let Ok(server) = rmcp::service::serve_server(Calculator::default(), server_io).await {
            let _ = server.waiting().await;
        }
    });
    McpSession::establish("in-process", client_io)
        .await
        .expect("in-process handshake")
}

/// Serve [`Calculator`] over streamable HTTP on an ephemeral port and return its URL.
pub async fn spawn_http_provider() -> String {
    let service = StreamableHttpService::new(
        || Ok(Calculator::default()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}/mcp")
}

/// Write a persisted provider config pointing at `url` and return its path.
pub fn write_http_config(dir: &Path, url: &str) -> PathBuf {
    let path = dir.join(mcp_skill::config::CONFIG_FILE_NAME);
    std::fs::write(&path, json!({"url": url}).to_string()).expect("write config");
    path
}

/// The `calculator` example binary, which serves [`Calculator`] over stdio.
///
/// `cargo test` builds examples next to the test executables' `deps`
/// directory.
pub fn calculator_bin() -> PathBuf {
    let mut dir = std::env::current_exe().expect("test executable path");
    dir.pop();
    if dir.ends_with("deps") {
        dir.pop();
    }
    let bin = dir
        .join("examples")
        .join(format!("calculator{}", std::env::consts::EXE_SUFFIX));
    assert!(bin.exists(), "calculator example not built at {}", bin.display());
    bin
}

/// Stdio provider entry that spawns the calculator example.
pub fn stdio_entry(args: &[&str], env: Value) -> Value {
    json!({
        "command": calculator_bin().to_string_lossy(),
        "args": args,
        "env": env,
    })
}

/// Write a persisted stdio provider config for the calculator example.
pub fn write_stdio_config(dir: &Path, args: &[&str], env: Value) -> PathBuf {
    let path = dir.join(mcp_skill::config::CONFIG_FILE_NAME);
    std::fs::write(&path, stdio_entry(args, env).to_string()).expect("write config");
    path
}
