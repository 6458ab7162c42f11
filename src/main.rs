//! Pokedex CLI entry point.
//!
//! Handles command-line argument parsing, error display, and command
//! execution. Supported commands:
//! - `fetch` - bulk-load combined records for the first N Pokémon
//! - `search` - look up a single Pokémon by name or dex number
//! - `theme` - show or change the persisted dark/light preference

use anyhow::Result;
use clap::Parser;
use pokedex_cli::cli;
use pokedex_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to a user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
