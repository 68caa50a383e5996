//! # sessionkit Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Foundational pieces shared by every helper in `common` and by the command
//! front end:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: The `SessionError` enum and `Result` alias
//!
//! ```rust
//! use sessionkit::core::config; // For loading configuration
//! use sessionkit::core::error::{Result, SessionError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
