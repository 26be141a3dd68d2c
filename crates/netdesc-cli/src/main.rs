//! netdesc CLI - structural descriptors of complex networks.
//!
//! Reads the configured catalog of Pajek networks, appends one descriptor
//! row per network to a CSV table and plots degree distributions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use netdesc_ops::{Config, OpsContext};

mod commands;

use commands::{catalog, config as config_cmd, describe, distribution, show};

/// netdesc - Describe complex networks.
///
/// Run `netdesc` or `netdesc describe` to process the whole catalog.
#[derive(Parser, Debug)]
#[command(
    name = "netdesc",
    author,
    version,
    about = "netdesc: structural descriptors of complex networks",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of the per-user one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Describe every network of the catalog (default command).
    ///
    /// Appends one row per network to the descriptor table and prints a
    /// summary block for each.
    Describe {
        /// Open the graph viewer after each network.
        #[arg(long)]
        show_graphs: bool,

        /// Skip networks that fail to load or describe instead of stopping.
        #[arg(short, long)]
        keep_going: bool,

        /// Only process these categories (can be specified multiple times).
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Use the networks found on disk instead of the configured lists.
        #[arg(long)]
        discover: bool,
    },

    /// Plot binned degree distributions as SVG charts.
    Distribution {
        /// Networks as `category/name` (defaults to the configured selection).
        networks: Vec<String>,

        /// Skip networks that fail instead of stopping.
        #[arg(short, long)]
        keep_going: bool,

        /// Directory for the charts (defaults to the configured one).
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Open one network in the graph viewer.
    Show {
        /// `category/name` from the catalog, or a path to a Pajek file.
        target: String,
    },

    /// List the catalog and whether each network file exists.
    Catalog {
        /// List the networks found on disk instead of the configured lists.
        #[arg(long)]
        discover: bool,
    },

    /// Inspect configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Show path to config file.
    Path,

    /// Write the default configuration to the config file.
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Reset must work before a config file exists
    if let Some(Commands::Config(ConfigCommands::Reset)) = &cli.command {
        return config_cmd::reset(cli.config.as_deref());
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let ctx = OpsContext::new(config);

    // Default to describe if no command given
    let command = cli.command.unwrap_or(Commands::Describe {
        show_graphs: ctx.config.show_graphs,
        keep_going: false,
        categories: Vec::new(),
        discover: false,
    });

    match command {
        Commands::Describe {
            show_graphs,
            keep_going,
            categories,
            discover,
        } => {
            let options = describe::Options {
                show_graphs: show_graphs || ctx.config.show_graphs,
                keep_going,
                categories,
                discover,
                echo: !cli.quiet,
            };
            describe::execute(&ctx, options)?;
        }

        Commands::Distribution {
            networks,
            keep_going,
            out_dir,
        } => {
            distribution::execute(&ctx, &networks, keep_going, out_dir)?;
        }

        Commands::Show { target } => {
            show::execute(&ctx, &target)?;
        }

        Commands::Catalog { discover } => {
            catalog::execute(&ctx, discover)?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show { json } => {
                config_cmd::show(&ctx.config, json)?;
            }
            ConfigCommands::Get { key } => {
                config_cmd::get(&ctx.config, &key)?;
            }
            ConfigCommands::Path => {
                config_cmd::path(cli.config.as_deref());
            }
            ConfigCommands::Reset => {
                config_cmd::reset(cli.config.as_deref())?;
            }
        },
    }

    Ok(())
}
