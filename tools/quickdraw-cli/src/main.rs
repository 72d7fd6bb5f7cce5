//! Quickdraw CLI: headless driver for the sketch-guessing core.
//!
//! Usage:
//!   quickdraw check                  Load the model and labels, report status
//!   quickdraw predict <IMAGE>        Classify an image file as a drawing
//!   quickdraw replay <SCRIPT>        Replay a scripted session

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quickdraw_common::config::{AppConfig, BlurMode};

mod commands;

#[derive(Parser)]
#[command(
    name = "quickdraw",
    about = "Draw a word, let the classifier guess it",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model artifact path
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Label file path
    #[arg(long, global = true)]
    labels: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the classifier and report whether it is ready
    Check,

    /// Normalize and classify an image file
    Predict {
        /// PNG or JPEG to treat as the canvas
        image: PathBuf,

        /// Print the 28x28 input as ASCII art
        #[arg(long)]
        preview: bool,

        /// Smoothing pass: auto|always|never
        #[arg(long, value_enum, default_value = "auto")]
        blur: BlurArg,
    },

    /// Drive a game session from a JSONL event script
    Replay {
        /// Script of timestamped pointer events, commands, and ticks
        script: PathBuf,

        /// Seed for target word selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BlurArg {
    Auto,
    Always,
    Never,
}

impl From<BlurArg> for BlurMode {
    fn from(arg: BlurArg) -> Self {
        match arg {
            BlurArg::Auto => BlurMode::Auto,
            BlurArg::Always => BlurMode::Always,
            BlurArg::Never => BlurMode::Never,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(labels) = cli.labels {
        config.labels_path = labels;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    quickdraw_common::logging::init_logging(&config.logging);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    match cli.command {
        Commands::Check => commands::check::run(&config),
        Commands::Predict {
            image,
            preview,
            blur,
        } => commands::predict::run(&config, image, preview, blur.into()),
        Commands::Replay { script, seed } => commands::replay::run(&config, script, seed),
    }
}
