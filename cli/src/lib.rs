//! # sessionkit Library Root
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Client-side helpers for talking to a remote command/session server:
//! HTTP transport with enforced timeouts, recursive file listing, temp-path
//! detection, and random subset sampling. The `sessionkit` binary
//! (`main.rs`) is a thin command-line front end over this library.
//!
//! - `core`: Configuration and error types.
//! - `common`: The helpers themselves.
//!
pub mod common;
pub mod core;
