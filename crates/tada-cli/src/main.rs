//! tada CLI
//!
//! Command-line interface for tada - local todo list management.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tada_core::{Config, TodoStore};

mod commands;
mod confirm;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "tada")]
#[command(about = "tada - local todo list management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Add a new todo item
    Add {
        /// Todo text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List all todo items, newest first
    #[command(alias = "ls")]
    List,
    /// Toggle completion of a todo item
    #[command(alias = "toggle")]
    Done {
        /// Todo ID (full id or prefix)
        id: String,
    },
    /// Delete a todo item
    #[command(alias = "rm")]
    Delete {
        /// Todo ID (full id or prefix)
        id: String,
    },
    /// Show todo counts (total, active, completed)
    Stats,
    /// Render the list as an HTML page
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
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
        /// Configuration key (data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;

    // TUI is the default when no command is given
    if matches!(&cli.command, Some(Commands::Tui) | None) {
        return tui::run(config);
    }

    let mut store = TodoStore::open_with_config(config)?;

    match cli.command.unwrap() {
        Commands::Tui => unreachable!(),           // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Add { text } => commands::todo::add(&mut store, &text.join(" "), &output),
        Commands::List => commands::todo::list(&store, &output),
        Commands::Done { id } => commands::todo::toggle(&mut store, &id, &output),
        Commands::Delete { id } => commands::todo::delete(&mut store, &id, &output),
        Commands::Stats => commands::stats::show(&store, &output),
        Commands::Export { out } => commands::export::run(&store, out, &output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
