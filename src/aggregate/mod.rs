//! Aggregation of per-endpoint fetches into combined Pokémon records.
//!
//! [`Aggregator`] orchestrates the bulk-load path: it lists identifiers,
//! runs three independent batch passes in parallel (base data + flavor
//! text, evolution resolution, special-status flags), and joins the result
//! sets by identifier into one [`CombinedPokemon`] per entity. It also
//! hosts [`Aggregator::format_one`], the single-entity path used by
//! interactive search, so both paths share the same combination logic and
//! cannot drift apart.
//!
//! # Defaults
//!
//! The join step guarantees that every record has all fields populated.
//! When a narrower fetch failed for an entity, the documented defaults are
//! substituted: `None` height/weight/sprite, empty name, empty ability,
//! type, evolution, and stat lists, `false` status flags, `"unknown"`
//! generation, and the literal flavor-text fallback. A failed sub-fetch
//! for one identifier never removes or corrupts records for others.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::api::models::{RawPokemon, Species};
use crate::api::PokeApi;
use crate::constants::{
    FLAVOR_TEXT_FALLBACK, FLAVOR_TEXT_LANGUAGE, FLAVOR_TEXT_VERSION, MAX_ENTITY_ID,
    UNKNOWN_GENERATION,
};
use crate::core::PokedexError;
use crate::evolution::{resolve_chain, resolve_stages, ChainCache, EvolutionStage, SpriteCache};
use crate::fetch::{fetch_in_batches, ItemOutcome};

/// One named base-stat value, order as returned by the API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatValue {
    /// Stat name (hp, attack, defense, speed, ...)
    pub name: String,
    /// Base value
    pub base: u32,
}

/// The canonical combined record handed to presentation.
///
/// Every field is always present; optional data is expressed with `Option`
/// or an empty collection rather than a missing key, so consumers can
/// render without per-field existence checks.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPokemon {
    /// Stable entity identifier; never mutated after creation
    pub id: u32,
    /// Species name, empty when the base fetch failed
    pub name: String,
    /// Height in decimeters
    pub height: Option<u32>,
    /// Weight in hectograms
    pub weight: Option<u32>,
    /// Default front sprite URL
    pub sprite_url: Option<String>,
    /// Non-hidden ability names
    pub abilities: Vec<String>,
    /// Type names, slot order
    pub types: Vec<String>,
    /// Selected flavor text, or the documented fallback
    pub flavor_text: String,
    /// Full evolution chain including the entity itself, base form first
    pub evolutions: Vec<EvolutionStage>,
    /// Base stats, order as returned by the API
    pub stats: Vec<StatValue>,
    /// Legendary classification
    pub is_legendary: bool,
    /// Mythical classification
    pub is_mythical: bool,
    /// Baby classification
    pub is_baby: bool,
    /// Generation label, `"unknown"` when species data is unavailable
    pub generation: String,
}

/// Base-pass payload: the raw record plus its selected flavor text.
#[derive(Debug)]
struct BaseData {
    raw: RawPokemon,
    flavor_text: String,
}

/// Status-pass payload: special-status flags and the generation label.
#[derive(Debug)]
struct StatusData {
    is_legendary: bool,
    is_mythical: bool,
    is_baby: bool,
    generation: String,
}

impl StatusData {
    fn from_species(species: &Species) -> Self {
        Self {
            is_legendary: species.is_legendary,
            is_mythical: species.is_mythical,
            is_baby: species.is_baby,
            generation: species
                .generation
                .as_ref()
                .map_or_else(|| UNKNOWN_GENERATION.to_string(), |g| g.name.clone()),
        }
    }
}

/// Select flavor text from a species record.
///
/// Preference order: an entry in the preferred language tagged with the
/// preferred game version, else any entry in the preferred language, else
/// the literal fallback. The selected text is whitespace-normalized since
/// the API embeds newline and form-feed characters.
#[must_use]
pub fn select_flavor_text(species: &Species) -> String {
    let in_language =
        |entry: &&crate::api::models::FlavorTextEntry| entry.language.name == FLAVOR_TEXT_LANGUAGE;

    let preferred = species
        .flavor_text_entries
        .iter()
        .filter(in_language)
        .find(|entry| {
            entry
                .version
                .as_ref()
                .is_some_and(|version| version.name == FLAVOR_TEXT_VERSION)
        })
        .or_else(|| species.flavor_text_entries.iter().find(in_language));

    preferred.map_or_else(
        || FLAVOR_TEXT_FALLBACK.to_string(),
        |entry| normalize_flavor_text(&entry.flavor_text),
    )
}

fn normalize_flavor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Orchestrates identifier listing, batched fetching, and the join step.
///
/// The evolution-chain and sprite caches live on the aggregator and are
/// scoped to its lifetime: one aggregation run or one interactive session.
/// They are never invalidated mid-run because chain and sprite data for a
/// given identifier is immutable during a session.
#[derive(Debug)]
pub struct Aggregator<A> {
    api: A,
    chain_cache: ChainCache,
    sprite_cache: SpriteCache,
}

impl<A: PokeApi> Aggregator<A> {
    /// Create an aggregator with fresh session caches.
    pub fn new(api: A) -> Self {
        Self {
            api,
            chain_cache: ChainCache::new(),
            sprite_cache: SpriteCache::new(),
        }
    }

    /// The API client this aggregator fetches through.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Retrieve the valid entity identifiers, at most `limit` of them.
    ///
    /// Issues one request to the index endpoint and maps the response to a
    /// dense 1-based sequence, clamped by the number of returned entries
    /// and by [`MAX_ENTITY_ID`].
    ///
    /// # Errors
    ///
    /// [`PokedexError::IndexFetch`] when `limit` is zero or the index
    /// endpoint is unreachable. This failure is fatal to the bulk-load
    /// path: without identifiers there is nothing to aggregate.
    pub async fn list_identifiers(&self, limit: u32) -> Result<Vec<u32>, PokedexError> {
        if limit == 0 {
            return Err(PokedexError::IndexFetch {
                reason: "limit must be a positive integer".to_string(),
            });
        }

        let index = self.api.fetch_index(limit).await.map_err(|err| {
            PokedexError::IndexFetch {
                reason: err.to_string(),
            }
        })?;

        // The endpoint may return fewer items than requested.
        let listed = index.results.len() as u32;
        let upper = listed.min(index.count).min(MAX_ENTITY_ID);
        debug!("index reports {} entities, listing 1..={upper}", index.count);
        Ok((1..=upper).collect())
    }

    /// Build combined records for all identifiers up to `max_id`.
    ///
    /// Runs three independent batch passes in parallel - base data with
    /// flavor text, evolution chains with stage sprites, and special-status
    /// flags - then joins them by identifier. The output length equals the
    /// identifier count; per-item failures are absorbed into defaulted
    /// fields and never abort the run.
    ///
    /// # Errors
    ///
    /// Only [`PokedexError::IndexFetch`] escapes this method; all narrower
    /// failures are logged and defaulted.
    pub async fn build_combined_records(
        &self,
        max_id: u32,
        batch_size: usize,
    ) -> Result<Vec<CombinedPokemon>, PokedexError> {
        let ids = self.list_identifiers(max_id).await?;
        info!("aggregating {} entities in batches of {batch_size}", ids.len());

        let api = &self.api;
        let chain_cache = &self.chain_cache;
        let sprite_cache = &self.sprite_cache;

        let base_run = fetch_in_batches(&ids, batch_size, |id| async move {
            let raw = api.fetch_pokemon(id).await?;
            // Flavor text is decoration: a species failure degrades it to
            // the fallback instead of discarding the base record.
            let flavor_text = match api.fetch_species(id).await {
                Ok(species) => select_flavor_text(&species),
                Err(err) => {
                    warn!("species fetch for #{id} failed: {err}");
                    FLAVOR_TEXT_FALLBACK.to_string()
                }
            };
            Ok(BaseData { raw, flavor_text })
        });

        let evolution_run = fetch_in_batches(&ids, batch_size, |id| async move {
            let species = api.fetch_species(id).await?;
            let names = match &species.evolution_chain {
                Some(chain_ref) => resolve_chain(api, &chain_ref.url, chain_cache).await,
                None => Vec::new(),
            };
            Ok(resolve_stages(api, &names, sprite_cache).await)
        });

        let status_run = fetch_in_batches(&ids, batch_size, |id| async move {
            let species = api.fetch_species(id).await?;
            Ok(StatusData::from_species(&species))
        });

        let (base, evolutions, status) = tokio::join!(base_run, evolution_run, status_run);

        let mut base_by_id = into_map(base);
        let mut evolutions_by_id = into_map(evolutions);
        let mut status_by_id = into_map(status);

        let records = ids
            .into_iter()
            .map(|id| {
                combine(
                    id,
                    base_by_id.remove(&id),
                    evolutions_by_id.remove(&id).unwrap_or_default(),
                    status_by_id.remove(&id),
                )
            })
            .collect();

        Ok(records)
    }

    /// Format one already-fetched base record into a combined record.
    ///
    /// This is the single-entity path used by interactive search. It
    /// fetches the species record for flavor text, status flags, and the
    /// evolution-chain reference, resolving the chain through the same
    /// session caches as the bulk path. Deterministic fields of the input
    /// record pass through unaltered; anything that cannot be fetched is
    /// defaulted, never an error.
    pub async fn format_one(&self, raw: RawPokemon) -> CombinedPokemon {
        let id = raw.id;
        let species = match self.api.fetch_species(id).await {
            Ok(species) => Some(species),
            Err(err) => {
                warn!("species fetch for #{id} failed: {err}");
                None
            }
        };

        let flavor_text = species
            .as_ref()
            .map_or_else(|| FLAVOR_TEXT_FALLBACK.to_string(), select_flavor_text);

        let evolutions = match species.as_ref().and_then(|s| s.evolution_chain.as_ref()) {
            Some(chain_ref) => {
                let names = resolve_chain(&self.api, &chain_ref.url, &self.chain_cache).await;
                resolve_stages(&self.api, &names, &self.sprite_cache).await
            }
            None => Vec::new(),
        };

        let status = species.as_ref().map(StatusData::from_species);

        combine(id, Some(BaseData { raw, flavor_text }), evolutions, status)
    }
}

fn into_map<T>(outcomes: Vec<ItemOutcome<T>>) -> HashMap<u32, T> {
    outcomes
        .into_iter()
        .filter_map(|outcome| {
            let id = outcome.id;
            outcome.into_value().map(|value| (id, value))
        })
        .collect()
}

fn combine(
    id: u32,
    base: Option<BaseData>,
    evolutions: Vec<EvolutionStage>,
    status: Option<StatusData>,
) -> CombinedPokemon {
    let (name, height, weight, sprite_url, abilities, types, stats, flavor_text) = match base {
        Some(BaseData { raw, flavor_text }) => (
            raw.name,
            raw.height,
            raw.weight,
            raw.sprites.front_default,
            raw.abilities
                .into_iter()
                .filter(|slot| !slot.is_hidden)
                .map(|slot| slot.ability.name)
                .collect(),
            raw.types.into_iter().map(|slot| slot.type_.name).collect(),
            raw.stats
                .into_iter()
                .map(|slot| StatValue {
                    name: slot.stat.name,
                    base: slot.base_stat,
                })
                .collect(),
            flavor_text,
        ),
        None => (
            String::new(),
            None,
            None,
            None,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            FLAVOR_TEXT_FALLBACK.to_string(),
        ),
    };

    let (is_legendary, is_mythical, is_baby, generation) = match status {
        Some(status) => (
            status.is_legendary,
            status.is_mythical,
            status.is_baby,
            status.generation,
        ),
        None => (false, false, false, UNKNOWN_GENERATION.to_string()),
    };

    CombinedPokemon {
        id,
        name,
        height,
        weight,
        sprite_url,
        abilities,
        types,
        flavor_text,
        evolutions,
        stats,
        is_legendary,
        is_mythical,
        is_baby,
        generation,
    }
}
