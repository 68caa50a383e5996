//! # sessionkit Post Command
//!
//! File: cli/src/commands/post.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `sessionkit post`: submits form data, and optionally files, and
//! prints the body of the reply. Without `-f` the form goes through the
//! fallback backend; with at least one `-f` the request becomes a multipart
//! upload through the rich backend.
//!
//! ```bash
//! # Execute code in cell 0
//! sessionkit post /execute/0 -d 'code=print(2+3)'
//!
//! # Upload a file under the part name "script.py"
//! sessionkit post /upload -f script.py=./local/script.py
//! ```
//!
use super::{parse_key_value, parse_timeout, print_body};
use anyhow::{Context, Result};
use clap::Parser;
use sessionkit::common::network::{Client, Files, Params};
use sessionkit::core::config::Config;
use std::fs::File;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "POST form data (and files) to a URL and print the response body")]
pub struct PostArgs {
    /// URL to post to. A leading `/` is joined onto `server.base_url`.
    url: String,

    /// Form field as KEY=VALUE. May be repeated.
    #[arg(short = 'd', long = "data", value_parser = parse_key_value)]
    data: Vec<(String, String)>,

    /// File part as NAME=PATH. May be repeated.
    #[arg(short = 'f', long = "file", value_parser = parse_key_value)]
    files: Vec<(String, String)>,

    /// Timeout in seconds. Defaults to `transport.default_timeout_secs`.
    #[arg(short, long, value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Always use the rich (reqwest) backend, even without files.
    #[arg(long)]
    rich: bool,
}

pub fn handle_post(args: PostArgs, config: &Config) -> Result<()> {
    let url = config.server.resolve(&args.url);
    info!(
        "Handling post command (URL: {}, fields: {}, files: {})",
        url,
        args.data.len(),
        args.files.len()
    );

    let mut files = Files::new();
    for (name, path) in &args.files {
        let handle =
            File::open(path).with_context(|| format!("Failed to open file for upload: {}", path))?;
        files.insert(name.clone(), handle);
    }
    let files = (!files.is_empty()).then_some(files);

    let client = Client::from_config(&config.transport)?;
    let data: Params = args.data.into_iter().collect();
    let body = if args.rich {
        client.post_rich(&url, Some(&data), files, args.timeout)
    } else {
        client.post(&url, Some(&data), files, args.timeout)
    }
    .with_context(|| format!("POST {} failed", url))?;

    print_body(&body);
    Ok(())
}
