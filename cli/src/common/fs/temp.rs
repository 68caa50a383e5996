//! # sessionkit Temp-Path Detection
//!
//! File: cli/src/common/fs/temp.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Decides whether a path was most likely produced by the system's temp-file
//! naming, i.e. whether it sits directly inside the system temp directory.
//! Session clients use this to tell scratch directories (safe to delete) from
//! user directories.
//!
//! ## Architecture
//!
//! - **`TempPrefix`**: The reference directory. `TempPrefix::detect` takes the
//!   parent of a freshly generated temp-file name; `TempPrefix::new` accepts any
//!   directory for callers (and tests) that want to inject it.
//! - **`temp_prefix`**: The process-wide prefix, detected on first use and
//!   reused afterwards. It is never recomputed within a process.
//! - **`is_temp_directory`**: Checks a path against the process-wide prefix.
//!
//! The candidate path is made absolute and normalized textually first (`.` and
//! `..` segments are resolved without touching the filesystem), then its parent
//! directory is compared with the prefix by filesystem identity: the same
//! device and inode on Unix, the same canonical path elsewhere. Symlinked
//! aliases of the temp directory therefore still match.
//!
//! If the parent directory or the prefix cannot be resolved, the check fails
//! with `SessionError::FileSystem` rather than answering `false`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sessionkit::common::fs::temp;
//!
//! # fn run_example() -> sessionkit::core::error::Result<()> {
//! let scratch = temp::fresh_temp_name()?;
//! assert!(temp::is_temp_directory(&scratch)?);
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, SessionError};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

static TEMP_PREFIX: OnceCell<TempPrefix> = OnceCell::new();

/// Directory that temp-file names are generated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempPrefix {
    dir: PathBuf,
}

impl TempPrefix {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the parent directory of a freshly generated temp-file name.
    pub fn detect() -> Result<Self> {
        let name = fresh_temp_name()?;
        let dir = name
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);
        debug!("Detected temp prefix: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// True when the parent directory of `path` is this prefix.
    pub fn contains(&self, path: &Path) -> Result<bool> {
        let absolute = lexical_absolute(path)?;
        let parent = absolute.parent().unwrap_or(&absolute);
        same_location(&self.dir, parent)
    }
}

/// The process-wide temp prefix, detected once on first call.
pub fn temp_prefix() -> Result<&'static TempPrefix> {
    TEMP_PREFIX.get_or_try_init(TempPrefix::detect)
}

/// True if `path` lies directly in the system temp directory.
///
/// # Errors
///
/// `SessionError::FileSystem` if the directory containing `path` (after
/// normalization) does not exist or cannot be inspected.
pub fn is_temp_directory(path: &Path) -> Result<bool> {
    temp_prefix()?.contains(path)
}

/// Generates a unique temp-file name. The file itself is not left behind.
pub fn fresh_temp_name() -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("tmp")
        .tempfile()
        .map_err(|e| SessionError::fs(std::env::temp_dir(), e))?;
    let name = file.path().to_path_buf();
    file.close().map_err(|e| SessionError::fs(&name, e))?;
    Ok(name)
}

/// Absolute form of `path` with `.` and `..` resolved textually.
fn lexical_absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| SessionError::fs(".", e))?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            // Popping at the root is a no-op, as `/..` is `/`.
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    Ok(normalized)
}

#[cfg(unix)]
fn same_location(a: &Path, b: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let meta_a = fs::metadata(a).map_err(|e| SessionError::fs(a, e))?;
    let meta_b = fs::metadata(b).map_err(|e| SessionError::fs(b, e))?;
    Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
}

#[cfg(not(unix))]
fn same_location(a: &Path, b: &Path) -> Result<bool> {
    let canon_a = fs::canonicalize(a).map_err(|e| SessionError::fs(a, e))?;
    let canon_b = fs::canonicalize(b).map_err(|e| SessionError::fs(b, e))?;
    Ok(canon_a == canon_b)
}
