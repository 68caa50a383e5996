//! # sessionkit Sample Command
//!
//! File: cli/src/commands/sample.rs
//! Author: Christi Mahu
//!
//! Implements `sessionkit sample <I> <J> <N>`: prints `N` distinct random
//! integers from `[I, J]`, ascending, separated by spaces.
//!
//! ```bash
//! sessionkit sample 5 10 3     # e.g. "7 9 10"
//! sessionkit sample 5 10 6     # always "5 6 7 8 9 10"
//! sessionkit sample -5 5 2     # negative bounds are accepted
//! ```
//!
use anyhow::{Context, Result};
use clap::Parser;
use sessionkit::common::random;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Print N distinct random integers from the closed interval [I, J]")]
pub struct SampleArgs {
    /// Lower bound (inclusive).
    #[arg(allow_negative_numbers = true)]
    i: i64,
    /// Upper bound (inclusive).
    #[arg(allow_negative_numbers = true)]
    j: i64,
    /// How many distinct values to draw.
    n: usize,
}

pub fn handle_sample(args: SampleArgs) -> Result<()> {
    info!("Sampling {} value(s) from [{}, {}]", args.n, args.i, args.j);
    let values = random::randint_set(args.i, args.j, args.n)
        .with_context(|| format!("Cannot draw {} value(s) from [{}, {}]", args.n, args.i, args.j))?;
    let line: Vec<String> = values.iter().map(i64::to_string).collect();
    println!("{}", line.join(" "));
    Ok(())
}
