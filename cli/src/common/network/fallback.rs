//! # Fallback HTTP Strategy
//!
//! File: cli/src/common/network/fallback.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `FallbackTransport` is the low-level backend: a `ureq` agent configured for
//! a single call. GET data is url-encoded onto the URL's query string; POST
//! data is sent as an `application/x-www-form-urlencoded` body. It cannot
//! express multipart uploads.
//!
//! The timeout is set on the agent built for the call (connect and overall
//! deadline) and is never stored anywhere process-wide, so concurrent calls
//! with different timeouts do not interfere with each other.
//!
use super::params::{Files, Params};
use super::transport::{self, Transport};
use crate::core::error::{Result, SessionError};
use reqwest::Url;
use std::io::Read;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Backend built on `ureq`.
#[derive(Debug, Clone)]
pub struct FallbackTransport {
    user_agent: String,
}

impl Default for FallbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackTransport {
    pub fn new() -> Self {
        Self::with_user_agent(concat!("sessionkit/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn agent(&self, timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .user_agent(&self.user_agent)
            .build()
    }
}

/// Appends `data` to `url` as a url-encoded query string.
pub fn url_with_query(url: &str, data: &Params) -> Result<String> {
    let mut parsed = Url::parse(url).map_err(|e| transport::http_error(url, &e))?;
    if !data.is_empty() {
        parsed.query_pairs_mut().extend_pairs(data.iter());
    }
    Ok(parsed.into())
}

impl Transport for FallbackTransport {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn supports_files(&self) -> bool {
        false
    }

    fn get(&self, url: &str, data: &Params, timeout: Duration) -> Result<String> {
        transport::validate_timeout(timeout)?;
        let full_url = url_with_query(url, data)?;
        debug!(url = %full_url, ?timeout, "fallback GET");
        let started = Instant::now();
        let result = self.agent(timeout).get(&full_url).call();
        let body = read_response(url, timeout, result)?;
        debug!(url, elapsed = ?started.elapsed(), bytes = body.len(), "fallback GET complete");
        Ok(body)
    }

    fn post(&self, url: &str, data: &Params, files: Files, timeout: Duration) -> Result<String> {
        if !files.is_empty() {
            return Err(SessionError::InvalidArgument(format!(
                "the {} transport cannot upload files ({} given)",
                self.name(),
                files.len()
            )));
        }
        transport::validate_timeout(timeout)?;
        debug!(url, ?timeout, params = data.len(), "fallback POST");
        let started = Instant::now();
        let form: Vec<(&str, &str)> = data.iter().collect();
        let result = self.agent(timeout).post(url).send_form(&form);
        let body = read_response(url, timeout, result)?;
        debug!(url, elapsed = ?started.elapsed(), bytes = body.len(), "fallback POST complete");
        Ok(body)
    }
}

// 4xx/5xx responses still carry a body; it is returned like any other.
fn read_response(
    url: &str,
    timeout: Duration,
    result: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<String> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            warn!(url, status = code, "server answered with a non-success status");
            response
        }
        Err(ureq::Error::Transport(t)) => return Err(classify(url, timeout, t)),
    };
    // `into_string` caps bodies at 10 MB; read everything, as the rich backend does.
    let mut bytes = Vec::new();
    response.into_reader().read_to_end(&mut bytes).map_err(|e| {
        if transport::is_timeout_kind(e.kind()) {
            transport::timeout_error(url, timeout)
        } else if transport::is_connection_kind(e.kind()) {
            transport::connection_error(url, &e)
        } else {
            transport::http_error(url, &e)
        }
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn classify(url: &str, timeout: Duration, err: ureq::Transport) -> SessionError {
    let io_kind = transport::io_kind_in_chain(&err);
    if io_kind.is_some_and(transport::is_timeout_kind) {
        return transport::timeout_error(url, timeout);
    }
    match err.kind() {
        ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed => {
            transport::connection_error(url, &err)
        }
        ureq::ErrorKind::Io if io_kind.is_some_and(transport::is_connection_kind) => {
            transport::connection_error(url, &err)
        }
        _ => transport::http_error(url, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/", port)
    }

    #[test]
    fn test_url_with_query_encodes_values() {
        let data = Params::new().with("command", "python -c 'x'").with("n", 5);
        let url = url_with_query("http://localhost:5000/popen", &data).unwrap();
        assert_eq!(
            url,
            "http://localhost:5000/popen?command=python+-c+%27x%27&n=5"
        );
    }

    #[test]
    fn test_url_with_query_empty_data_leaves_url_alone() {
        let url = url_with_query("http://localhost:5000/status", &Params::new()).unwrap();
        assert_eq!(url, "http://localhost:5000/status");
    }

    #[test]
    fn test_url_with_query_extends_existing_query() {
        let data = Params::new().with("b", 2);
        let url = url_with_query("http://localhost:5000/x?a=1", &data).unwrap();
        assert_eq!(url, "http://localhost:5000/x?a=1&b=2");
    }

    #[test]
    fn test_fallback_refuses_files() {
        let files = Files::new().with("a.txt", "content");
        let err = FallbackTransport::new()
            .post("http://127.0.0.1:1/", &Params::new(), files, Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidArgument(_)));
    }

    #[test]
    fn test_fallback_get_connection_refused() {
        let err = FallbackTransport::new()
            .get(&closed_port_url(), &Params::new(), Duration::from_secs(2))
            .unwrap_err();
        assert!(err.is_connection(), "unexpected error: {err:?}");
    }

    #[test]
    fn test_fallback_post_connection_refused() {
        let data = Params::new().with("code", "print(1)");
        let err = FallbackTransport::new()
            .post(&closed_port_url(), &data, Files::new(), Duration::from_secs(2))
            .unwrap_err();
        assert!(err.is_connection(), "unexpected error: {err:?}");
    }
}
