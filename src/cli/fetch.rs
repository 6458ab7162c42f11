//! The `pokedex fetch` command: bulk-load the Pokédex and print it.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::common::{display_id, format_height, format_weight, status_label};
use crate::aggregate::{Aggregator, CombinedPokemon};
use crate::api::HttpPokeApi;
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_FETCH_LIMIT};

/// How combined records are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per Pokémon
    Summary,
    /// Pretty-printed JSON array of combined records
    Json,
}

/// Bulk-load combined records for the first N Pokémon.
#[derive(Debug, Args)]
pub struct FetchCommand {
    /// Maximum number of Pokémon to load
    #[arg(long, default_value_t = DEFAULT_FETCH_LIMIT)]
    limit: u32,

    /// Number of Pokémon fetched concurrently per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

impl FetchCommand {
    /// Run the bulk load and print the results.
    pub async fn execute(self, no_progress: bool) -> Result<()> {
        let api = HttpPokeApi::new()?;
        let aggregator = Aggregator::new(api);

        let spinner = make_spinner(no_progress, self.limit);
        let records = aggregator
            .build_combined_records(self.limit, self.batch_size)
            .await?;
        spinner.finish_and_clear();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
            OutputFormat::Summary => print_summary(&records),
        }

        Ok(())
    }
}

fn make_spinner(no_progress: bool, limit: u32) -> ProgressBar {
    if no_progress {
        return ProgressBar::hidden();
    }
    // Draws to stderr and stays hidden automatically when it is not a TTY.
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading up to {limit} Pokémon..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_summary(records: &[CombinedPokemon]) {
    for record in records {
        let name = if record.name.is_empty() {
            "<unavailable>".red().to_string()
        } else {
            format!("{:<16}", record.name).green().bold().to_string()
        };
        let types = if record.types.is_empty() {
            "-".to_string()
        } else {
            record.types.join("/")
        };

        let mut line = format!(
            "{} {name} {:<16} {:>7} {:>8}",
            display_id(record.id),
            types,
            format_height(record.height),
            format_weight(record.weight),
        );
        if let Some(label) = status_label(record) {
            line.push_str(&format!("  {}", label.yellow()));
        }
        println!("{line}");
    }

    println!("\n{} {} Pokémon", "Loaded".bold(), records.len());
}
