//! # sessionkit Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`:
//! - `sessionkit_cmd()`: an `assert_cmd::Command` for the compiled binary.
//! - `TestServer`: a small axum server on an ephemeral localhost port, run on
//!   its own thread and tokio runtime so the blocking clients under test can
//!   call it from ordinary `#[test]` functions.
//!
//! Routes served:
//! - `GET /echo` → `GET k1=v1&k2=v2` (decoded query pairs, in order)
//! - `POST /form` → `POST k1=v1&...` (decoded url-encoded body)
//! - `POST /upload` → one line per multipart field: `field name=value` or `file name:file_name:content`
//! - `GET|POST /slow` → `late`, after `SLOW_DELAY`
//! - `GET /missing` → 404 with body `missing`
//! - `GET /agent` → the request's `User-Agent`
//! - `GET /big` → `BIG_BODY_LEN` bytes of `x`
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

use axum::{
    extract::{Multipart, Query},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    routing::get,
    Form, Router,
};
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;
use tokio::sync::oneshot;

/// How long `/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(1);

/// Size of the `/big` body, above ureq's 10 MB `into_string` cap.
pub const BIG_BODY_LEN: usize = 11 * 1024 * 1024;

/// `assert_cmd::Command` for the `sessionkit` binary.
pub fn sessionkit_cmd() -> Command {
    Command::cargo_bin("sessionkit").expect("Failed to find sessionkit binary for testing")
}

/// A URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/echo", port)
}

/// Running test server. Stops accepting connections when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn start() -> Self {
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("build test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind test server");
                addr_tx
                    .send(listener.local_addr().expect("test server addr"))
                    .expect("report test server addr");
                axum::serve(listener, router().into_make_service())
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("test server failed");
            });
        });

        let addr = addr_rx.recv().expect("test server did not start");
        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn router() -> Router {
    Router::new()
        .route("/echo", get(echo_query))
        .route("/form", axum::routing::post(echo_form))
        .route("/upload", axum::routing::post(echo_upload))
        .route("/slow", get(slow).post(slow))
        .route("/missing", get(missing))
        .route("/agent", get(agent))
        .route("/big", get(big))
}

fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

async fn echo_query(Query(pairs): Query<Vec<(String, String)>>) -> String {
    format!("GET {}", join_pairs(&pairs))
}

async fn echo_form(Form(pairs): Form<Vec<(String, String)>>) -> String {
    format!("POST {}", join_pairs(&pairs))
}

async fn echo_upload(mut multipart: Multipart) -> Result<String, StatusCode> {
    let mut lines = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        match file_name {
            Some(file_name) => lines.push(format!("file {}:{}:{}", name, file_name, content)),
            None => lines.push(format!("field {}={}", name, content)),
        }
    }
    Ok(lines.join("\n"))
}

async fn slow() -> &'static str {
    tokio::time::sleep(SLOW_DELAY).await;
    "late"
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "missing")
}

async fn big() -> String {
    "x".repeat(BIG_BODY_LEN)
}

async fn agent(headers: HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
