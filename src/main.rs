// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Campusnav CLI - campus map navigation

use anyhow::Result;
use campusnav::commands::{self, CommandContext};
use campusnav::config;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campusnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "CAMPUSNAV_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Map data file override (JSON or TOML node/edge rows)
    #[arg(long, env = "CAMPUSNAV_DATA", global = true)]
    data: Option<std::path::PathBuf>,

    /// Map data fetch timeout override, in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest route between two locations
    Route {
        /// Origin node ID
        from: String,

        /// Destination node ID
        to: String,
    },

    /// Route from a person's default starting point to a building
    Navigate {
        /// Building name (e.g. 教一楼)
        building: String,

        /// Person attribute selecting the starting point (e.g. male, female)
        #[arg(short, long)]
        attribute: Option<String>,
    },

    /// Replay map clicks through the two-click route picker
    Pick {
        /// Clicked node IDs, in order
        #[arg(required = true)]
        nodes: Vec<String>,
    },

    /// List the direct connections of a location
    Neighbors {
        /// Node ID
        node: String,
    },

    /// Summarize the loaded map
    Info,

    /// Export the map to various formats
    Export {
        /// Output format (dot, json)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Highlight the route starting here
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Highlight the route ending here
        #[arg(long, requires = "from")]
        to: Option<String>,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.data.timeout_ms = timeout_ms;
    }

    let ctx = CommandContext {
        config,
        json: cli.json,
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    // Execute command
    match cli.command {
        Commands::Route { from, to } => commands::route::run(&ctx, &from, &to),
        Commands::Navigate {
            building,
            attribute,
        } => commands::navigate::run(&ctx, &building, attribute.as_deref()),
        Commands::Pick { nodes } => commands::pick::run(&ctx, &nodes),
        Commands::Neighbors { node } => commands::neighbors::run(&ctx, &node),
        Commands::Info => commands::info::run(&ctx),
        Commands::Export {
            format,
            output,
            from,
            to,
        } => commands::export::run(&ctx, &format, output, from.as_deref(), to.as_deref()),
        Commands::Config => commands::config::run(&ctx),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
