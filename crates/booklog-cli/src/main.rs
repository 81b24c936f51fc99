//! booklog CLI
//!
//! Command-line interface for booklog - a local-first books catalog.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use booklog_core::{CatalogStore, Config};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "booklog")]
#[command(about = "booklog - Local-first books catalog")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books, optionally filtered
    #[command(alias = "ls")]
    List {
        /// ID prefix
        #[arg(long)]
        id: Option<String>,
        /// Part of the name (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
        /// Part of the author (case-insensitive)
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Show book details
    Show {
        /// Book ID (full ID or unique prefix)
        id: String,
    },
    /// Add a new book
    Add {
        /// Book name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Author
        #[arg(short, long, default_value = "")]
        author: String,
        /// Rating from 0 to 5 (decimal comma accepted)
        #[arg(short, long, default_value = "")]
        rating: String,
        /// Genre (see `booklog genres`); "Unknown" when omitted
        #[arg(
            short,
            long,
            value_parser = PossibleValuesParser::new(booklog_core::GENRES.iter().copied())
        )]
        genre: Option<String>,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Cover image URL (http:// or https://)
        #[arg(long, default_value = "")]
        cover: String,
    },
    /// Toggle the read flag of a book
    #[command(alias = "read")]
    ToggleRead {
        /// Book ID (full ID or unique prefix)
        id: String,
    },
    /// List the genres offered when adding a book
    Genres,
    /// Show storage status
    Status,
    /// Replace the catalog with the seed dataset
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, backend, storage_key, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands must work even with a broken config
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config = Config::load_with_cli_override(config_path)?;
    init_logging(cli.verbose, &config);

    debug!(
        data_dir = %config.data_dir.display(),
        backend = %config.backend,
        "Configuration loaded"
    );

    let mut store = CatalogStore::open_with_config(&config)?;

    match cli.command {
        Commands::List { id, name, author } => {
            commands::book::list(&mut store, id, name, author, &output)
        }
        Commands::Show { id } => commands::book::show(&mut store, &id, &output),
        Commands::Add {
            name,
            author,
            rating,
            genre,
            description,
            cover,
        } => {
            let draft = commands::book::DraftArgs {
                name,
                author,
                rating,
                genre: genre.unwrap_or_default(),
                description,
                cover,
            };
            commands::book::add(&mut store, draft, &output)
        }
        Commands::ToggleRead { id } => commands::book::toggle_read(&mut store, &id, &output),
        Commands::Genres => {
            output.print_genres(booklog_core::GENRES);
            Ok(())
        }
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Reset { yes } => commands::book::reset(&mut store, yes, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Set up tracing for the CLI
///
/// `RUST_LOG` wins over `-v`. Logs go to `log_file` when configured,
/// otherwise to stderr.
fn init_logging(verbose: u8, config: &Config) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "booklog_core={},booklog_cli={}",
            log_level, log_level
        ))
    });

    match config.log_file {
        Some(ref path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                    return;
                }
            };

            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
