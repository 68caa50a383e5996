//! # Rich HTTP Strategy
//!
//! File: cli/src/common/network/rich.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `RichTransport` sends requests through `reqwest`'s blocking client. It is the
//! only backend that can upload files (multipart form), and it enforces the
//! timeout on the whole request (connect, send, and reading the body).
//!
//! ## Connection lifecycle
//!
//! A new `reqwest::blocking::Client` is built for each call with idle pooling
//! disabled (`pool_max_idle_per_host(0)`). The client is dropped when the call
//! returns, which closes its connection; nothing stays open between calls and
//! no explicit cleanup step is needed afterwards.
//!
use super::params::{FileContent, Files, Params};
use super::transport::{self, Transport};
use crate::core::error::{Result, SessionError};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use std::io::Cursor;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Backend built on `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct RichTransport {
    user_agent: String,
}

impl Default for RichTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTransport {
    pub fn new() -> Self {
        Self::with_user_agent(concat!("sessionkit/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn client(&self, url: &str, timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(0)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| transport::http_error(url, &e))
    }
}

impl Transport for RichTransport {
    fn name(&self) -> &'static str {
        "rich"
    }

    fn supports_files(&self) -> bool {
        true
    }

    fn get(&self, url: &str, data: &Params, timeout: Duration) -> Result<String> {
        transport::validate_timeout(timeout)?;
        debug!(url, ?timeout, params = data.len(), "rich GET");
        let client = self.client(url, timeout)?;
        let mut request = client.get(url);
        if !data.is_empty() {
            request = request.query(data.as_pairs());
        }
        execute(url, timeout, request)
    }

    fn post(&self, url: &str, data: &Params, files: Files, timeout: Duration) -> Result<String> {
        transport::validate_timeout(timeout)?;
        debug!(url, ?timeout, params = data.len(), files = files.len(), "rich POST");
        let client = self.client(url, timeout)?;
        let request = if files.is_empty() {
            client.post(url).form(data.as_pairs())
        } else {
            client.post(url).multipart(build_form(data, files))
        };
        execute(url, timeout, request)
    }
}

/// Form fields first, then one part per file. Raw content is wrapped in an
/// in-memory reader; readers are handed over as they are.
fn build_form(data: &Params, files: Files) -> multipart::Form {
    let mut form = multipart::Form::new();
    for (key, value) in data.iter() {
        form = form.text(key.to_string(), value.to_string());
    }
    for (name, content) in files {
        let part = match content {
            FileContent::Text(text) => {
                let len = text.len() as u64;
                multipart::Part::reader_with_length(Cursor::new(text.into_bytes()), len)
            }
            FileContent::Bytes(bytes) => {
                let len = bytes.len() as u64;
                multipart::Part::reader_with_length(Cursor::new(bytes), len)
            }
            FileContent::Reader(reader) => multipart::Part::reader(reader),
        };
        form = form.part(name.clone(), part.file_name(name));
    }
    form
}

fn execute(url: &str, timeout: Duration, request: RequestBuilder) -> Result<String> {
    let started = Instant::now();
    let response = request.send().map_err(|e| classify(url, timeout, e))?;
    let status = response.status();
    if !status.is_success() {
        warn!(url, %status, "server answered with a non-success status");
    }
    let body = response.text().map_err(|e| classify(url, timeout, e))?;
    debug!(url, %status, elapsed = ?started.elapsed(), bytes = body.len(), "rich request complete");
    Ok(body)
}

fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> SessionError {
    let io_kind = transport::io_kind_in_chain(&err);
    if err.is_timeout() || io_kind.is_some_and(transport::is_timeout_kind) {
        transport::timeout_error(url, timeout)
    } else if err.is_connect() || io_kind.is_some_and(transport::is_connection_kind) {
        transport::connection_error(url, &err)
    } else {
        transport::http_error(url, &err)
    }
}
