use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hostsctl::cmd_fetch;
use hostsctl::cmd_parse;
use hostsctl::common::ViewArgs;

#[derive(Parser, Debug)]
#[command(name = "hostsctl", version, about = "Router host list CLI")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Output JSON
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Read a saved host list document
    Parse {
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Download the host list feed from the device
    Fetch {
        #[arg(long)]
        url: String,
        /// Request timeout, 0 disables it
        #[arg(long, default_value_t = 10_000)]
        timeout_ms: u64,
        #[command(flatten)]
        view: ViewArgs,
    },
}

fn main() -> Result<()> {
    let Cli { verbose, json, cmd } = Cli::parse();

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd {
        Cmd::Parse { file, view } => cmd_parse::run(file, view, json)?,
        Cmd::Fetch {
            url,
            timeout_ms,
            view,
        } => cmd_fetch::run(url, timeout_ms, view, json)?,
    };

    Ok(())
}
