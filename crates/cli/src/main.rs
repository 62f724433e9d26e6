// ABOUTME: CLI for importing podcast feeds with podsift.
// ABOUTME: Fetches a feed from URL, file, or stdin and prints the normalized JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use podsift_client::Client;
use podsift_feed::{parse_feed_bytes, ParsedFeed};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Import one or more podcast RSS feeds and output normalized JSON.
#[derive(Parser, Debug)]
#[command(name = "podsift")]
#[command(about = "Import podcast RSS feeds and print normalized JSON", long_about = None)]
struct Args {
    /// Feed URL(s) (http/https) or local file paths. Use "-" to read one feed from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Fetch timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum accepted response body size in bytes.
    #[arg(long, default_value_t = podsift_client::DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .max_body_bytes(args.max_body_bytes)
        .build();

    let mut results = Vec::new();
    let mut failed = 0usize;

    for target in &args.targets {
        match import_target(&client, target).await {
            Ok(feed) => results.push(json!({
                "target": target,
                "ok": true,
                "feed": feed,
                "error": null
            })),
            Err(err) => {
                failed += 1;
                results.push(json!({
                    "target": target,
                    "ok": false,
                    "feed": null,
                    "error": err.to_string()
                }));
            }
        }
    }

    // Single target keeps the caller contract: the feed object on success,
    // {"error": message} on failure. Multiple targets get an envelope.
    let output = if args.targets.len() == 1 {
        let first = &results[0];
        if first["ok"].as_bool() == Some(true) {
            first["feed"].clone()
        } else {
            json!({ "error": first["error"] })
        }
    } else {
        json!({
            "feeds": results,
            "totalFeeds": args.targets.len(),
            "imported": args.targets.len() - failed,
            "failed": failed
        })
    };

    let rendered = if args.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("podsift: failed to serialize output: {err}");
            return ExitCode::FAILURE;
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn import_target(client: &Client, target: &str) -> Result<ParsedFeed> {
    if target.starts_with("http://") || target.starts_with("https://") {
        return Ok(client.import(target).await?);
    }

    let bytes = load_bytes(target)?;
    Ok(parse_feed_bytes(&bytes)?)
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read(path)?)
}
