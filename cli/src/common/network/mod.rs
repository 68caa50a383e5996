//! # sessionkit Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Blocking HTTP GET/POST helpers used to talk to the session server. Every call
//! carries an explicit timeout (10 seconds unless told otherwise) and returns the
//! response body as text.
//!
//! ## Architecture
//!
//! - **`transport`**: The `Transport` trait, the `Strategy` policy and shared error classification.
//! - **`rich`**: `RichTransport`, built on `reqwest`. Supports multipart file uploads.
//! - **`fallback`**: `FallbackTransport`, built on `ureq`. Url-encoded payloads only.
//! - **`recording`**: `RecordingTransport`, an I/O-free double for tests.
//! - **`params`**: `Params` (form/query data) and `Files` (upload parts).
//!
//! `Client` owns one backend per strategy and routes each call:
//! - `get` → fallback, `get_rich` → rich.
//! - `post` → rich when files are given, fallback otherwise (`select_post_strategy`).
//! - `post_rich` → rich.
//!
//! The free functions `get`, `get_rich`, `post`, `post_rich` build a default
//! `Client` for a single call.
//!
//! ## Errors
//!
//! Failures come back as `SessionError::Connection` (DNS, refused, reset) or
//! `SessionError::Timeout` (time budget used up), distinct from each other and
//! from other client errors (`SessionError::Http`). Nothing is retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sessionkit::common::network::{self, Files, Params};
//! use std::time::Duration;
//!
//! # fn run_example() -> sessionkit::core::error::Result<()> {
//! let data = Params::new().with("command", "python");
//! let reply = network::get("http://localhost:5000/popen", Some(&data), network::DEFAULT_TIMEOUT)?;
//!
//! let files = Files::new().with("script.py", "print(2+3)");
//! let reply = network::post(
//!     "http://localhost:5000/upload",
//!     None,
//!     Some(files),
//!     Duration::from_secs(30),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::config::TransportConfig;
use crate::core::error::{Result, SessionError};
use std::time::Duration;
use tracing::debug;

/// Form/query data and upload parts.
pub mod params;
/// The `Transport` trait and backend selection policy.
pub mod transport;
/// `reqwest`-based backend with file upload support.
pub mod rich;
/// `ureq`-based backend for url-encoded payloads.
pub mod fallback;
/// Test double that records calls instead of sending them.
pub mod recording;

pub use fallback::FallbackTransport;
pub use params::{FileContent, Files, Params};
pub use recording::{Method, RecordedCall, RecordingTransport};
pub use rich::RichTransport;
pub use transport::{select_post_strategy, Strategy, Transport, MAX_TIMEOUT};

/// Timeout applied when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Routes requests to the rich or fallback backend.
pub struct Client {
    default_timeout: Duration,
    rich: Box<dyn Transport + Send + Sync>,
    fallback: Box<dyn Transport + Send + Sync>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_transports(RichTransport::new(), FallbackTransport::new())
    }

    /// Client using the configured default timeout and user agent.
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        Ok(Self::with_transports(
            RichTransport::with_user_agent(&config.user_agent),
            FallbackTransport::with_user_agent(&config.user_agent),
        )
        .default_timeout(config.default_timeout()?))
    }

    /// Client over arbitrary backends, e.g. `RecordingTransport`s in tests.
    pub fn with_transports(
        rich: impl Transport + Send + Sync + 'static,
        fallback: impl Transport + Send + Sync + 'static,
    ) -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
            rich: Box::new(rich),
            fallback: Box::new(fallback),
        }
    }

    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    fn transport(&self, strategy: Strategy) -> &dyn Transport {
        match strategy {
            Strategy::Rich => self.rich.as_ref(),
            Strategy::Fallback => self.fallback.as_ref(),
        }
    }

    fn send_get(
        &self,
        strategy: Strategy,
        url: &str,
        data: Option<&Params>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let transport = self.transport(strategy);
        let empty = Params::new();
        debug!(url, strategy = transport.name(), "GET");
        transport.get(url, data.unwrap_or(&empty), timeout.unwrap_or(self.default_timeout))
    }

    fn send_post(
        &self,
        strategy: Strategy,
        url: &str,
        data: Option<&Params>,
        files: Files,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let transport = self.transport(strategy);
        if !files.is_empty() && !transport.supports_files() {
            return Err(SessionError::InvalidArgument(format!(
                "the {} transport cannot upload files ({} given)",
                transport.name(),
                files.len()
            )));
        }
        let empty = Params::new();
        debug!(url, strategy = transport.name(), files = files.len(), "POST");
        transport.post(
            url,
            data.unwrap_or(&empty),
            files,
            timeout.unwrap_or(self.default_timeout),
        )
    }

    /// GET through the fallback backend.
    pub fn get(&self, url: &str, data: Option<&Params>, timeout: Option<Duration>) -> Result<String> {
        self.send_get(Strategy::Fallback, url, data, timeout)
    }

    /// GET through the rich backend.
    pub fn get_rich(
        &self,
        url: &str,
        data: Option<&Params>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        self.send_get(Strategy::Rich, url, data, timeout)
    }

    /// POST, choosing the backend with `select_post_strategy`.
    pub fn post(
        &self,
        url: &str,
        data: Option<&Params>,
        files: Option<Files>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let files = files.unwrap_or_default();
        let strategy = select_post_strategy(&files);
        self.send_post(strategy, url, data, files, timeout)
    }

    /// POST through the rich backend.
    pub fn post_rich(
        &self,
        url: &str,
        data: Option<&Params>,
        files: Option<Files>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        self.send_post(Strategy::Rich, url, data, files.unwrap_or_default(), timeout)
    }
}

/// GETs `url` with `data` as query parameters (fallback backend).
pub fn get(url: &str, data: Option<&Params>, timeout: Duration) -> Result<String> {
    Client::new().get(url, data, Some(timeout))
}

/// GETs `url` with `data` as query parameters (rich backend).
pub fn get_rich(url: &str, data: Option<&Params>, timeout: Duration) -> Result<String> {
    Client::new().get_rich(url, data, Some(timeout))
}

/// POSTs `data`, plus `files` when given. Uploads go through the rich backend,
/// plain form posts through the fallback backend.
pub fn post(
    url: &str,
    data: Option<&Params>,
    files: Option<Files>,
    timeout: Duration,
) -> Result<String> {
    Client::new().post(url, data, files, Some(timeout))
}

/// POSTs `data` and `files` through the rich backend.
pub fn post_rich(
    url: &str,
    data: Option<&Params>,
    files: Option<Files>,
    timeout: Duration,
) -> Result<String> {
    Client::new().post_rich(url, data, files, Some(timeout))
}
