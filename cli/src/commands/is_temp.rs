//! # sessionkit Is-Temp Command
//!
//! File: cli/src/commands/is_temp.rs
//! Author: Christi Mahu
//!
//! Implements `sessionkit is-temp <PATH>`: prints `true` when `PATH` sits
//! directly in the system temp directory, `false` otherwise. Fails if the
//! directory containing `PATH` does not exist.
//!
use anyhow::{Context, Result};
use clap::Parser;
use sessionkit::common::fs::temp;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(about = "Report whether a path lies directly in the system temp directory")]
pub struct IsTempArgs {
    /// Path to check. It does not need to exist; its parent directory does.
    path: PathBuf,
}

pub fn handle_is_temp(args: IsTempArgs) -> Result<()> {
    let prefix = temp::temp_prefix().context("Failed to locate the system temp directory")?;
    debug!("Temp prefix: {}", prefix.path().display());

    let is_temp = prefix
        .contains(&args.path)
        .with_context(|| format!("Failed to resolve {}", args.path.display()))?;
    println!("{}", is_temp);
    Ok(())
}
