//! TinyAlpha CLI - PNG to TAL and back
//!
//! A Pure Rust converter for the TAL palette-indexed run-length image format.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_decode, cmd_encode, cmd_info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tal")]
#[command(author, version, about = "TinyAlpha - lossless TAL image converter")]
#[command(long_about = "
TinyAlpha converts RGBA PNG images to the TAL format and back.
TAL suits sprites: few colors, large transparent areas.

Examples:
  tal encode sprite.png
  tal encode sprite.png --output build/sprite.tal -o
  tal decode sprite.tal
  tal info sprite.tal --json
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a PNG image into TAL
    #[command(alias = "e")]
    Encode {
        /// PNG file to encode
        input: PathBuf,

        /// Destination (defaults to the input with a .tal extension)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite the destination if it exists
        #[arg(short = 'o', long)]
        overwrite: bool,

        /// Reject images wider or taller than this
        #[arg(long, default_value_t = 8192)]
        max_dimension: u32,
    },

    /// Decode a TAL file into PNG
    #[command(alias = "d")]
    Decode {
        /// TAL file to decode
        input: PathBuf,

        /// Destination (defaults to the input with a .png extension)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite the destination if it exists
        #[arg(short = 'o', long)]
        overwrite: bool,
    },

    /// Show the header of a TAL file
    #[command(alias = "i")]
    Info {
        /// TAL file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn init_logging(level: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            overwrite,
            max_dimension,
        } => cmd_encode(&input, output.as_deref(), overwrite, max_dimension),
        Commands::Decode {
            input,
            output,
            overwrite,
        } => cmd_decode(&input, output.as_deref(), overwrite),
        Commands::Info { input, json } => cmd_info(&input, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
