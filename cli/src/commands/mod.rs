//! # sessionkit Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Command-line front end over the `sessionkit` library. Each command maps to
//! one library helper and prints its result to stdout:
//!
//! - `get`: `network::Client::get` / `get_rich`
//! - `post`: `network::Client::post` / `post_rich`
//! - `files`: `fs::all_files`
//! - `is-temp`: `fs::is_temp_directory`
//! - `sample`: `random::randint_set`
//!
//! Each command module defines its own arguments struct and handler function.
//! Shared argument parsers live in this file.
//!
use sessionkit::common::network::MAX_TIMEOUT;
use std::time::Duration;

/// Implements `sessionkit files`.
pub mod files;
/// Implements `sessionkit get`.
pub mod get;
/// Implements `sessionkit is-temp`.
pub mod is_temp;
/// Implements `sessionkit post`.
pub mod post;
/// Implements `sessionkit sample`.
pub mod sample;

/// Parses `KEY=VALUE`. The value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

/// Parses a positive number of seconds (fractions allowed).
pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", s))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be positive, got {}", s));
    }
    let timeout = Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("timeout '{}' is out of range: {}", s, e))?;
    if timeout > MAX_TIMEOUT {
        return Err(format!(
            "timeout must be at most {} seconds, got {}",
            MAX_TIMEOUT.as_secs(),
            s
        ));
    }
    Ok(timeout)
}

/// Prints a response body, ending it with a newline if it lacks one.
pub fn print_body(body: &str) {
    if body.ends_with('\n') {
        print!("{}", body);
    } else {
        println!("{}", body);
    }
}
