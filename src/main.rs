use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use diary_analyzer::services::settings::load_config_or_default;
use diary_analyzer::{JournalEntry, analyze_entry, init_logging, serve};
use dotenv::dotenv;

/// Diary Analyzer - emotional analysis and motivational advice for journal entries
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a YAML config file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one entry and print the result
    Analyze {
        /// Entry text
        #[arg(short, long, conflicts_with = "file")]
        entry: Option<String>,

        /// Read the entry from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Serve the web form
    Serve {
        /// Listen address, overrides web.bind
        #[arg(short, long)]
        bind: Option<String>,
    },
}

fn read_entry(entry: Option<String>, file: Option<PathBuf>) -> anyhow::Result<JournalEntry> {
    if let Some(text) = entry {
        return Ok(JournalEntry::from(text));
    }
    if let Some(path) = file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read entry from {}", path.display()))?;
        return Ok(JournalEntry::from(text));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read entry from stdin")?;
    Ok(JournalEntry::from(text))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    let args = Args::parse();

    let cfg = load_config_or_default(args.config.as_deref())?;
    let _log_guard = init_logging(&cfg.logging);

    match args.command {
        Command::Analyze { entry, file } => {
            let entry = read_entry(entry, file)?;
            let result = analyze_entry(&cfg, &entry).await?;
            println!("{}", result);
        }
        Command::Serve { bind } => serve(cfg, bind).await?,
    }
    Ok(())
}
