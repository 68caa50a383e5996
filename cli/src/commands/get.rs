//! # sessionkit Get Command
//!
//! File: cli/src/commands/get.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `sessionkit get`: fetches a URL and prints the body.
//!
//! ```bash
//! # Query the configured server (server.base_url + path)
//! sessionkit get /popen -d command=python
//!
//! # Absolute URL, short timeout, reqwest backend
//! sessionkit get http://localhost:5000/status --timeout 0.5 --rich
//! ```
//!
use super::{parse_key_value, parse_timeout, print_body};
use anyhow::{Context, Result};
use clap::Parser;
use sessionkit::common::network::{Client, Params};
use sessionkit::core::config::Config;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "GET a URL and print the response body")]
pub struct GetArgs {
    /// URL to fetch. A leading `/` is joined onto `server.base_url`.
    url: String,

    /// Query parameter as KEY=VALUE. May be repeated.
    #[arg(short = 'd', long = "data", value_parser = parse_key_value)]
    data: Vec<(String, String)>,

    /// Timeout in seconds. Defaults to `transport.default_timeout_secs`.
    #[arg(short, long, value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Send through the rich (reqwest) backend instead of the fallback one.
    #[arg(long)]
    rich: bool,
}

pub fn handle_get(args: GetArgs, config: &Config) -> Result<()> {
    let url = config.server.resolve(&args.url);
    info!("Handling get command (URL: {}, rich: {})", url, args.rich);

    let client = Client::from_config(&config.transport)?;
    let data: Params = args.data.into_iter().collect();
    let body = if args.rich {
        client.get_rich(&url, Some(&data), args.timeout)
    } else {
        client.get(&url, Some(&data), args.timeout)
    }
    .with_context(|| format!("GET {} failed", url))?;

    print_body(&body);
    Ok(())
}
