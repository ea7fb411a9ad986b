//! Clubscore CLI
//!
//! Runs scoring payloads through the JSON API from files: rule preview,
//! match completion, ledger reconciliation, and rule validation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cs_cli")]
#[command(about = "Run scoring payloads through the clubscore engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate automatic rules against match facts (no persistence)
    Preview {
        /// Input JSON payload path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build the completion snapshot for a match payload
    Complete {
        /// Input JSON payload path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Rebuild editable manual counts from persisted ledger rows
    Reconcile {
        /// Input JSON payload path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate rules and profiles before save
    Validate {
        /// Input JSON payload path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview { r#in, out } => run(cs_core::preview_rules_json, &r#in, out.as_deref()),
        Commands::Complete { r#in, out } => run(cs_core::complete_match_json, &r#in, out.as_deref()),
        Commands::Reconcile { r#in, out } => {
            run(cs_core::reconcile_match_json, &r#in, out.as_deref())
        }
        Commands::Validate { r#in, out } => run(cs_core::validate_rules_json, &r#in, out.as_deref()),
    }
}

fn run(
    api: fn(&str) -> cs_core::Result<String>,
    input: &std::path::Path,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let payload = fs::read_to_string(input)
        .with_context(|| format!("Failed to read payload: {}", input.display()))?;

    let response = api(&payload)?;
    let pretty = prettify(&response)?;

    match output {
        Some(path) => {
            fs::write(path, &pretty)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", pretty),
    }
    Ok(())
}

fn prettify(response: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(response).context("Engine returned malformed JSON")?;
    Ok(serde_json::to_string_pretty(&value)?)
}
