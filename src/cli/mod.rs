//! Command-line interface for the pokedex client.
//!
//! Each command is implemented in its own module with its own argument
//! structure and execution logic:
//!
//! - `fetch` - bulk-load combined records for the first N Pokémon
//! - `search` - look up a single Pokémon by name or dex number
//! - `theme` - show or change the persisted dark/light preference
//!
//! All commands share the global options on [`Cli`]: `--verbose`/`--quiet`
//! for logging verbosity, `--config` for a custom preferences file, and
//! `--no-progress` to disable spinners for automation. [`CliConfig`]
//! carries the resolved values so commands receive configuration by
//! injection instead of reading global state, which keeps them testable.

mod common;
mod fetch;
mod search;
mod theme;

pub use fetch::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration resolved from the global CLI flags.
///
/// Built once by [`Cli::build_config`] and passed into command execution,
/// so tests can inject custom configurations without touching process
/// state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level filter; `None` suppresses logging entirely (quiet mode)
    pub log_level: Option<String>,
    /// Whether to disable progress indicators
    pub no_progress: bool,
    /// Custom preferences file path
    pub config_path: Option<PathBuf>,
}

/// Main CLI structure for the pokedex client.
#[derive(Parser)]
#[command(
    name = "pokedex",
    about = "Pokédex aggregation client - fetch and browse Pokémon data",
    version,
    long_about = "Fetches Pokémon data (stats, types, evolutions, sprites, flavor text) \
                  from a public REST API and combines it into one record per Pokémon."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug-level logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom preferences file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable progress spinners (for scripts and CI)
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Bulk-load combined records for the first N Pokémon
    Fetch(fetch::FetchCommand),

    /// Look up a single Pokémon by name or national dex number
    Search(search::SearchCommand),

    /// Show or change the persisted dark/light theme preference
    Theme(theme::ThemeCommand),
}

impl Cli {
    /// Translate the global flags into a [`CliConfig`].
    ///
    /// Verbose maps to debug-level logging, quiet disables logging, and
    /// the default is info level.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Execute with an injected configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        init_logging(config.log_level.as_deref());

        match self.command {
            Commands::Fetch(cmd) => cmd.execute(config.no_progress).await,
            Commands::Search(cmd) => cmd.execute().await,
            Commands::Theme(cmd) => cmd.execute(config.config_path).await,
        }
    }
}

/// Initialize the tracing subscriber for this process.
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
/// Logs go to stderr so they never interleave with JSON on stdout.
fn init_logging(level: Option<&str>) {
    let Some(level) = level else { return };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn verbose_maps_to_debug_level() {
        let cli = Cli::parse_from(["pokedex", "--verbose", "fetch"]);
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn quiet_disables_logging_and_progress() {
        let cli = Cli::parse_from(["pokedex", "--quiet", "fetch"]);
        let config = cli.build_config();
        assert_eq!(config.log_level, None);
        assert!(config.no_progress);
    }

    #[test]
    fn default_is_info_level() {
        let cli = Cli::parse_from(["pokedex", "fetch"]);
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert!(!config.no_progress);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["pokedex", "--verbose", "--quiet", "fetch"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["pokedex", "theme", "--config", "/tmp/p.toml", "get"]);
        let config = cli.build_config();
        assert_eq!(config.config_path.as_deref(), Some(std::path::Path::new("/tmp/p.toml")));
    }

    #[test]
    fn fetch_accepts_limit_and_batch_size() {
        let result =
            Cli::try_parse_from(["pokedex", "fetch", "--limit", "10", "--batch-size", "5"]);
        assert!(result.is_ok());
    }

    #[test]
    fn search_requires_a_term() {
        assert!(Cli::try_parse_from(["pokedex", "search"]).is_err());
        assert!(Cli::try_parse_from(["pokedex", "search", "pikachu"]).is_ok());
    }
}
