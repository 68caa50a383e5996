//! # sessionkit Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error type returned by every library helper in
//! sessionkit. Each failure kind a caller may want to react to differently is
//! its own variant, so callers `match` on the error instead of inspecting
//! message strings.
//!
//! ## Architecture
//!
//! - `SessionError`: A `thiserror` enum covering transport, sampling, filesystem
//!   and configuration failures.
//! - `Result<T>`: Library-wide alias for `std::result::Result<T, SessionError>`.
//!
//! The binary (`main.rs` and `commands/`) wraps these in `anyhow::Error` and adds
//! context at the edges; the library never does.
//!
//! ## Examples
//!
//! Distinguishing a slow server from an unreachable one:
//!
//! ```rust,no_run
//! use sessionkit::common::network;
//! use sessionkit::core::error::SessionError;
//!
//! match network::get("http://localhost:5000/popen", None, network::DEFAULT_TIMEOUT) {
//!     Ok(body) => println!("{}", body),
//!     Err(SessionError::Timeout { .. }) => eprintln!("server is slow, try again later"),
//!     Err(SessionError::Connection { .. }) => eprintln!("server is not running"),
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the sessionkit library.
#[derive(Error, Debug)]
pub enum SessionError {
    /// DNS failure, refused or reset connection.
    #[error("Connection to '{url}' failed: {reason}")]
    Connection { url: String, reason: String },

    /// The configured time budget elapsed before the request completed.
    #[error("Request to '{url}' timed out after {timeout_secs:.3}s")]
    Timeout { url: String, timeout_secs: f64 },

    /// Any other HTTP client failure (malformed URL, undecodable body, ...).
    #[error("HTTP request to '{url}' failed: {reason}")]
    Http { url: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Filesystem error at '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Builds a `FileSystem` error for `path`.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// True for the `Timeout` kind.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SessionError::Timeout { .. })
    }

    /// True for the `Connection` kind.
    pub fn is_connection(&self) -> bool {
        matches!(self, SessionError::Connection { .. })
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SessionError>;
