//! halfset - runs a command stream against a halving multiset
//!
//! Usage:
//!   halfset [INPUT] [--log-format text|json]
//!
//! Reads commands from INPUT, or stdin when INPUT is absent or `-`. Dump
//! lines and the final state go to stdout, logs go to stderr.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use halfset::command::{CommandRunner, parse_commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "halfset")]
#[command(about = "Insert values and delete the largest half of a multiset")]
struct Cli {
    /// Command file (`q` followed by `1 x`, `2` or `3` operations)
    input: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let input = read_input(cli.input.as_ref())?;
    let commands = parse_commands(&input).context("failed to parse command stream")?;
    tracing::info!(operations = commands.len(), "running command stream");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut runner = CommandRunner::new();
    for command in commands {
        if let Some(dump) = runner.apply(command) {
            writeln!(out, "{dump}")?;
        }
    }

    let size = runner.multiset().len();
    write!(out, "{}", runner.finish())?;
    out.flush()?;

    tracing::info!(size, "finished");
    Ok(())
}
