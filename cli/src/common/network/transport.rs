//! # Transport Interface
//!
//! File: cli/src/common/network/transport.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Defines the `Transport` trait implemented by every HTTP backend, the
//! `Strategy` policy deciding which backend a POST goes through, and the
//! helpers backends share for timeout checks and error classification.
//!
//! Two production backends exist:
//! - `RichTransport` (`rich.rs`): full-featured client, can upload files.
//! - `FallbackTransport` (`fallback.rs`): minimal client, url-encoded payloads only.
//!
//! `RecordingTransport` (`recording.rs`) is a test double.
//!
use super::params::{Files, Params};
use crate::core::error::{Result, SessionError};
use std::error::Error as StdError;
use std::io;
use std::time::{Duration, Instant};

/// Longest time budget a single call may be given.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A blocking HTTP backend. Every call completes, fails, or times out before returning.
pub trait Transport {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Whether `post` accepts a non-empty `Files`.
    fn supports_files(&self) -> bool;

    /// GETs `url` with `data` as the query string and returns the body text.
    fn get(&self, url: &str, data: &Params, timeout: Duration) -> Result<String>;

    /// POSTs `data` (and `files`, if supported) to `url` and returns the body text.
    fn post(&self, url: &str, data: &Params, files: Files, timeout: Duration) -> Result<String>;
}

/// Which backend handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Rich,
    Fallback,
}

/// File uploads need multipart encoding, which only the rich backend provides.
pub fn select_post_strategy(files: &Files) -> Strategy {
    if files.is_empty() {
        Strategy::Fallback
    } else {
        Strategy::Rich
    }
}

/// Rejects a zero timeout and anything above `MAX_TIMEOUT`.
/// `Instant::now() + timeout` must be representable as a deadline.
pub fn validate_timeout(timeout: Duration) -> Result<()> {
    if timeout.is_zero() {
        return Err(SessionError::InvalidArgument(
            "timeout must be a positive duration".to_string(),
        ));
    }
    if timeout > MAX_TIMEOUT || Instant::now().checked_add(timeout).is_none() {
        return Err(SessionError::InvalidArgument(format!(
            "timeout of {:?} exceeds the maximum of {:?}",
            timeout, MAX_TIMEOUT
        )));
    }
    Ok(())
}

/// Finds the first `io::Error` in an error's source chain and returns its kind.
pub(crate) fn io_kind_in_chain(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        current = e.source();
    }
    None
}

pub(crate) fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    // Socket read timeouts surface as WouldBlock on Unix and TimedOut on Windows.
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

pub(crate) fn is_connection_kind(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
    )
}

pub(crate) fn timeout_error(url: &str, timeout: Duration) -> SessionError {
    SessionError::Timeout {
        url: url.to_string(),
        timeout_secs: timeout.as_secs_f64(),
    }
}

pub(crate) fn connection_error(url: &str, err: &dyn std::fmt::Display) -> SessionError {
    SessionError::Connection {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

pub(crate) fn http_error(url: &str, err: &dyn std::fmt::Display) -> SessionError {
    SessionError::Http {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapper(io::Error);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "wrapped")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_select_post_strategy() {
        assert_eq!(select_post_strategy(&Files::new()), Strategy::Fallback);
        let files = Files::new().with("a.txt", "content");
        assert_eq!(select_post_strategy(&files), Strategy::Rich);
    }

    #[test]
    fn test_validate_timeout() {
        assert!(validate_timeout(Duration::from_millis(1)).is_ok());
        assert!(validate_timeout(MAX_TIMEOUT).is_ok());
        let err = validate_timeout(Duration::ZERO).unwrap_err();
        assert!(matches!(err, SessionError::InvalidArgument(_)));
    }

    #[test]
    fn test_validate_timeout_rejects_huge_budgets() {
        for timeout in [
            MAX_TIMEOUT + Duration::from_secs(1),
            Duration::from_secs(u64::MAX),
            Duration::MAX,
        ] {
            let err = validate_timeout(timeout).unwrap_err();
            assert!(matches!(err, SessionError::InvalidArgument(_)), "{timeout:?}");
            assert!(err.to_string().contains("exceeds the maximum"));
        }
    }

    #[test]
    fn test_io_kind_found_through_source_chain() {
        let err = Wrapper(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        let kind = io_kind_in_chain(&err);
        assert_eq!(kind, Some(io::ErrorKind::TimedOut));
        assert!(is_timeout_kind(kind.unwrap()));
        assert!(!is_connection_kind(kind.unwrap()));
    }

    #[test]
    fn test_io_kind_absent() {
        let err = SessionError::InvalidArgument("x".into());
        assert_eq!(io_kind_in_chain(&err), None);
    }
}
