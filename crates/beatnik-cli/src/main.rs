//! beatnik - drum notation to MIDI converter
//!
//! Subcommands:
//! - `beatnik convert [INPUT] [-o OUTPUT]` - Write a Standard MIDI File
//! - `beatnik check [INPUT]` - Parse notation and summarize it
//! - `beatnik config` - Show the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use beatnik::{MAX_BPM, MIN_BPM};

mod commands;
mod config;
mod telemetry;

use config::BeatnikConfig;

#[derive(Parser)]
#[command(name = "beatnik")]
#[command(about = "Convert drum notation to MIDI")]
#[command(version)]
struct Cli {
    /// Config file (replaces ./beatnik.toml)
    #[arg(short, long, global = true, env = "BEATNIK_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert notation to a Standard MIDI File
    Convert {
        /// Notation file (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// MIDI file to write (stdout if omitted or "-")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tempo for notation without a bpm directive
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_BPM as i64..=MAX_BPM as i64))]
        bpm: Option<u32>,
    },

    /// Parse notation and print a summary
    Check {
        /// Notation file (stdin if omitted or "-")
        input: Option<PathBuf>,
    },

    /// Show the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) =
        BeatnikConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    telemetry::init(&config.telemetry.log_level, cli.verbose)?;

    for path in &sources.files {
        tracing::debug!("Loaded config from {}", path.display());
    }
    for var in &sources.env_overrides {
        tracing::debug!("Config overridden by {}", var);
    }

    match cli.command {
        Commands::Convert { input, output, bpm } => {
            let bpm = bpm.unwrap_or(config.defaults.bpm);
            commands::convert(input.as_deref(), output.as_deref(), bpm)
        }
        Commands::Check { input } => {
            let summary = commands::check(input.as_deref(), config.defaults.bpm)?;
            println!("{}", summary);
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml());
            if !sources.files.is_empty() || !sources.env_overrides.is_empty() {
                println!();
            }
            for path in &sources.files {
                println!("# loaded from {}", path.display());
            }
            for var in &sources.env_overrides {
                println!("# overridden by ${}", var);
            }
            Ok(())
        }
    }
}
