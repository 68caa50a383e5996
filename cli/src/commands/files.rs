//! # sessionkit Files Command
//!
//! File: cli/src/commands/files.rs
//! Author: Christi Mahu
//!
//! Implements `sessionkit files [DIR]`: prints every file under `DIR` (or
//! `files.default_root` from configuration), one relative path per line,
//! sorted. Empty directories print nothing.
//!
use anyhow::{Context, Result};
use clap::Parser;
use sessionkit::common::fs::tree;
use sessionkit::core::config::Config;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "List all files under a directory, relative to it")]
pub struct FilesArgs {
    /// Directory to list. Defaults to `files.default_root`.
    dir: Option<PathBuf>,
}

pub fn handle_files(args: FilesArgs, config: &Config) -> Result<()> {
    let root = args
        .dir
        .unwrap_or_else(|| PathBuf::from(&config.files.default_root));
    info!("Listing files under {}", root.display());

    let files = tree::all_files(&root)
        .with_context(|| format!("Failed to list files under {}", root.display()))?;
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}
