//! # sessionkit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Read-only filesystem helpers. Nothing in here writes to disk except the
//! short-lived file `temp::fresh_temp_name` creates and removes.
//!
//! ## Architecture
//!
//! - **`tree`**: Recursive file enumeration (`all_files`), sorted, relative to the root, empty directories ignored.
//! - **`temp`**: Detection of paths generated in the system temp directory (`is_temp_directory`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sessionkit::common::fs::{temp, tree};
//! use std::path::Path;
//!
//! # fn run_example() -> sessionkit::core::error::Result<()> {
//! let dir = Path::new("/tmp/tmpabc123");
//! if temp::is_temp_directory(dir)? {
//!     let files = tree::all_files(dir)?;
//!     println!("{} scratch file(s)", files.len());
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Temp-directory detection (`is_temp_directory`, `TempPrefix`).
pub mod temp;
/// Recursive file listing (`all_files`).
pub mod tree;

pub use temp::is_temp_directory;
pub use tree::all_files;
