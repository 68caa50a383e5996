//! # Recording Transport
//!
//! File: cli/src/common/network/recording.rs
//! Author: Christi Mahu
//!
//! A `Transport` that performs no I/O. It remembers every call and answers with
//! a fixed body, so code built on top of the transport can be tested without a
//! server. Calls render as one line each:
//!
//! ```text
//! GET: http://localhost:8000 data={foo: 5} timeout=2s
//! POST: http://localhost:8000/upload data={} files=[a.txt] timeout=10s
//! ```
//!
use super::params::{Files, Params};
use super::transport::{self, Transport};
use crate::core::error::Result;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One call seen by a `RecordingTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub data: Params,
    pub files: Vec<String>,
    pub timeout: Duration,
}

impl fmt::Display for RecordedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{}: {} data={}", method, self.url, self.data)?;
        if !self.files.is_empty() {
            write!(f, " files=[{}]", self.files.join(", "))?;
        }
        write!(f, " timeout={:?}", self.timeout)
    }
}

#[derive(Debug)]
pub struct RecordingTransport {
    body: String,
    accepts_files: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new("")
    }
}

impl RecordingTransport {
    /// Answers every call with `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            accepts_files: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reports no file support, like the fallback backend.
    pub fn without_file_support(mut self) -> Self {
        self.accepts_files = false;
        self
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, call: RecordedCall) -> String {
        debug!("{}", call);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
        self.body.clone()
    }
}

impl Transport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn supports_files(&self) -> bool {
        self.accepts_files
    }

    fn get(&self, url: &str, data: &Params, timeout: Duration) -> Result<String> {
        transport::validate_timeout(timeout)?;
        Ok(self.record(RecordedCall {
            method: Method::Get,
            url: url.to_string(),
            data: data.clone(),
            files: Vec::new(),
            timeout,
        }))
    }

    fn post(&self, url: &str, data: &Params, files: Files, timeout: Duration) -> Result<String> {
        transport::validate_timeout(timeout)?;
        Ok(self.record(RecordedCall {
            method: Method::Post,
            url: url.to_string(),
            data: data.clone(),
            files: files.names().into_iter().map(String::from).collect(),
            timeout,
        }))
    }
}
