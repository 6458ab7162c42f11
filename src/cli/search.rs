//! The `pokedex search` command: look up one Pokémon by name or number.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{display_id, format_height, format_weight, status_label};
use super::fetch::OutputFormat;
use crate::aggregate::CombinedPokemon;
use crate::api::HttpPokeApi;
use crate::search::SearchSession;

/// Look up a single Pokémon and print its combined record.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Species name or national dex number
    term: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

impl SearchCommand {
    /// Run the lookup and print the result.
    ///
    /// An unmatched term surfaces as a "not found" error; narrower
    /// failures (missing species data, unreachable evolution chain)
    /// degrade to defaulted fields instead.
    pub async fn execute(self) -> Result<()> {
        let api = HttpPokeApi::new()?;
        let session = SearchSession::new(api);
        let record = session.lookup(&self.term).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*record)?),
            OutputFormat::Summary => print_detail(&record),
        }

        Ok(())
    }
}

fn print_detail(record: &CombinedPokemon) {
    println!(
        "{} {}",
        record.name.green().bold(),
        display_id(record.id).dimmed()
    );
    if let Some(label) = status_label(record) {
        println!("  {}", label.yellow());
    }
    println!("  {}", record.flavor_text);
    println!(
        "  Height: {}  Weight: {}  Generation: {}",
        format_height(record.height),
        format_weight(record.weight),
        record.generation
    );
    println!("  Types: {}", join_or_dash(&record.types));
    println!("  Abilities: {}", join_or_dash(&record.abilities));

    if !record.stats.is_empty() {
        println!("  Stats:");
        for stat in &record.stats {
            println!("    {:<16} {:>4}", stat.name, stat.base);
        }
    }

    if !record.evolutions.is_empty() {
        println!("  Evolutions:");
        for stage in &record.evolutions {
            match &stage.sprite_url {
                Some(url) => println!("    {:<16} {}", stage.name, url.dimmed()),
                None => println!("    {}", stage.name),
            }
        }
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
