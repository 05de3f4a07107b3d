//! Daub CLI - headless driver for the Daub painting engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{params, render, session::SessionArgs, simulate, validate};

#[derive(Parser)]
#[command(name = "daub")]
#[command(about = "Generative particle painting, driven headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paint a scripted circular stroke and report particle statistics
    Simulate {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Paint a scripted stroke and rasterize the final frame to an image
    Render {
        #[command(flatten)]
        session: SessionArgs,

        /// Output image path
        #[arg(short, long, default_value = "daub.png")]
        output: String,
    },

    /// Show the palette parameter schema
    Params {
        /// Studio config whose [palette] overrides to apply
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Validate a studio config file, including its presets
    Validate {
        /// Path to config file
        config: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Simulate { session, format } => simulate::run(session, &format),
        Commands::Render { session, output } => render::run(session, &output),
        Commands::Params { config, format } => params::run(config.as_deref(), &format),
        Commands::Validate { config, format } => validate::run(&config, &format),
    }
}
