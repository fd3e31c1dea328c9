//! CLI for the jsonfetch pipeline step.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_validate};

/// Top-level CLI for jsonfetch.
#[derive(Debug, Parser)]
#[command(name = "jsonfetch")]
#[command(about = "jsonfetch: fetch JSON records over HTTP and store them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Step configuration: a config file, command-line values, or both.
/// Command-line values win over the file.
#[derive(Debug, Clone, Default, Args)]
pub struct StepArgs {
    /// Step config file (`.json`, otherwise TOML).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// URL to fetch.
    #[arg(long)]
    pub url: Option<String>,

    /// Attach a Google Application Default Credentials bearer token.
    #[arg(long)]
    pub use_google_token: bool,

    /// OAuth scope for the token (repeatable; replaces scopes from the file).
    #[arg(long = "scope", value_name = "SCOPE")]
    pub scopes: Vec<String>,

    /// Extra request header as `NAME=VALUE` or `NAME: VALUE` (repeatable).
    #[arg(long = "header", value_name = "HEADER", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the URL and write the records to the output file.
    Run {
        #[command(flatten)]
        step: StepArgs,

        /// Output file; `.jsonl`/`.ndjson` write JSON Lines, anything else a JSON array.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,
    },

    /// Check the step configuration without fetching anything.
    Validate {
        #[command(flatten)]
        step: StepArgs,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run { step, output } => run_fetch(&step, &output)?,
            CliCommand::Validate { step } => run_validate(&step)?,
        }

        Ok(())
    }
}

/// Header names cannot contain `=` or `:`, so the first of either splits the pair.
fn parse_header(s: &str) -> Result<(String, String), String> {
    let idx = s
        .find(|c: char| c == '=' || c == ':')
        .ok_or_else(|| format!("invalid header `{s}`: expected NAME=VALUE or NAME: VALUE"))?;
    let name = s[..idx].trim();
    if name.is_empty() {
        return Err(format!("invalid header `{s}`: empty name"));
    }
    Ok((name.to_string(), s[idx + 1..].trim().to_string()))
}
