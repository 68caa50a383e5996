//! # sessionkit File Tree Enumeration
//!
//! File: cli/src/common/fs/tree.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Lists every file below a directory, at any depth, as paths relative to that
//! directory. Used to find out what a worksheet or session directory contains
//! before syncing it to the server.
//!
//! ## Behaviour
//!
//! - Only files are listed. Directories never produce an entry, so an empty
//!   directory, or a chain of directories with no file at the bottom, is invisible.
//! - Paths are relative to the root and use the platform's separator.
//! - The result is sorted.
//! - Symlinked directories are not descended into. A symlink is listed as a
//!   file unless it points to a directory.
//! - Any I/O error during the walk (missing root, unreadable subdirectory) is
//!   returned as `SessionError::FileSystem`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sessionkit::common::fs::tree;
//! use std::path::Path;
//!
//! # fn run_example() -> sessionkit::core::error::Result<()> {
//! for file in tree::all_files(Path::new("./session_42"))? {
//!     println!("{}", file.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, SessionError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Returns the sorted, root-relative paths of all files under `root`.
///
/// # Errors
///
/// Returns `SessionError::FileSystem` if `root` does not exist, is not a
/// directory, or any part of the tree cannot be read.
pub fn all_files(root: &Path) -> Result<Vec<PathBuf>> {
    // WalkDir over a plain file yields the file itself; reject it up front.
    let metadata = std::fs::metadata(root).map_err(|e| SessionError::fs(root, e))?;
    if !metadata.is_dir() {
        return Err(SessionError::fs(
            root,
            io::Error::new(io::ErrorKind::Other, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            SessionError::fs(path, e.into())
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }

        // Entries always live under `root`, so a relative path exists.
        let relative = pathdiff::diff_paths(entry.path(), root)
            .unwrap_or_else(|| entry.path().to_path_buf());
        files.push(relative);
    }

    // Plain string order, so `m.txt` sorts before `m/n`.
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    debug!("Found {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Files `a`, `xyz.abc`, `m/n/k/foo` plus an empty `x/y/z` chain.
    #[test]
    fn test_all_files_ignores_empty_directories() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let d = dir.path();
        fs::write(d.join("a"), "")?;
        fs::write(d.join("xyz.abc"), "")?;
        fs::create_dir_all(d.join("x").join("y").join("z"))?;
        fs::create_dir_all(d.join("m").join("n").join("k"))?;
        fs::write(d.join("m").join("n").join("k").join("foo"), "")?;

        let files = all_files(d)?;
        assert_eq!(
            files,
            vec![
                PathBuf::from("a"),
                Path::new("m").join("n").join("k").join("foo"),
                PathBuf::from("xyz.abc"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_all_files_empty_directory() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("only").join("dirs"))?;
        assert!(all_files(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_all_files_sorted() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(dir.path().join(name), name)?;
        }
        let files = all_files(dir.path())?;
        assert_eq!(
            files,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("c.txt")
            ]
        );
        Ok(())
    }

    #[test]
    fn test_all_files_string_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("m"))?;
        fs::write(dir.path().join("m").join("n"), "")?;
        fs::write(dir.path().join("m.txt"), "")?;
        let files = all_files(dir.path())?;
        assert_eq!(files, vec![PathBuf::from("m.txt"), Path::new("m").join("n")]);
        Ok(())
    }

    #[test]
    fn test_all_files_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = all_files(&missing).unwrap_err();
        assert!(matches!(err, SessionError::FileSystem { .. }));
    }

    #[test]
    fn test_all_files_root_is_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let err = all_files(&file).unwrap_err();
        assert!(matches!(err, SessionError::FileSystem { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_all_files_symlinks() -> std::result::Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::symlink;
        let dir = tempdir()?;
        let d = dir.path();
        fs::create_dir(d.join("real"))?;
        fs::write(d.join("real").join("f"), "")?;
        symlink(d.join("real").join("f"), d.join("link_to_file"))?;
        symlink(d.join("real"), d.join("link_to_dir"))?;

        let files = all_files(d)?;
        assert_eq!(
            files,
            vec![PathBuf::from("link_to_file"), Path::new("real").join("f")]
        );
        Ok(())
    }
}
