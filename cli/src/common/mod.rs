//! # sessionkit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The helpers a session-server client needs. The submodules are independent
//! of each other; they share only the error type from `core::error`.
//!
//! - **`network`**: Blocking HTTP GET/POST with enforced timeouts and optional file uploads.
//! - **`fs`**: Recursive file listing and temp-directory detection.
//! - **`random`**: Uniform random subsets of an integer interval.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sessionkit::common::{fs, network, random};
//! use std::path::Path;
//!
//! # fn run_example() -> sessionkit::core::error::Result<()> {
//! let status = network::get("http://localhost:5000/status", None, network::DEFAULT_TIMEOUT)?;
//! let files = fs::all_files(Path::new("./session"))?;
//! let cells = random::randint_set(0, 99, 5)?;
//! # Ok(())
//! # }
//! ```
//!

/// Filesystem helpers (`all_files`, `is_temp_directory`).
pub mod fs;
/// HTTP transport (`get`, `post`, `Client`, backends).
pub mod network;
/// Random subset sampling (`randint_set`).
pub mod random;
