//! Evolution-chain resolution and sprite memoization.
//!
//! Many entities within one generation share an evolution chain resource,
//! and many share evolution partners, so both lookups are cached for the
//! duration of one aggregation run (or one interactive session):
//!
//! - [`ChainCache`] maps a chain URL to its flattened name list. A cache
//!   hit returns immediately with no network call.
//! - [`SpriteCache`] maps a species name to its sprite URL.
//!
//! Both caches hold a [`tokio::sync::OnceCell`] per key inside a
//! [`dashmap::DashMap`], which gives the at-most-once-fetch-per-key
//! guarantee even when many per-item futures race on the same key. Chain
//! data for a given identifier is immutable during a session, so entries
//! are never invalidated mid-run.
//!
//! # Failure policy
//!
//! A failed or malformed chain fetch is logged and yields an empty list;
//! the cell is left unset so a later resolution in the same session may
//! retry. A failed sprite lookup is logged and **cached as `None`** so the
//! same failing call is not repeated within the session.

use dashmap::DashMap;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::warn;

use crate::api::models::ChainLink;
use crate::api::PokeApi;
use crate::core::PokedexError;

/// One displayable evolution stage: a species name and its sprite, if any.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionStage {
    /// Species name of this stage
    pub name: String,
    /// Sprite URL, or `None` when the lookup failed or the entity has none
    pub sprite_url: Option<String>,
}

/// Session-scoped cache of flattened evolution chains, keyed by chain URL.
#[derive(Debug, Default)]
pub struct ChainCache {
    entries: DashMap<String, Arc<OnceCell<Vec<String>>>>,
}

impl ChainCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a resolved list is cached for `chain_url`.
    #[must_use]
    pub fn contains(&self, chain_url: &str) -> bool {
        self.entries
            .get(chain_url)
            .is_some_and(|cell| cell.initialized())
    }

    fn cell(&self, chain_url: &str) -> Arc<OnceCell<Vec<String>>> {
        self.entries.entry(chain_url.to_string()).or_default().clone()
    }
}

/// Session-scoped cache of sprite URLs, keyed by species name.
///
/// Failures are memoized as `None`: evolution partners recur across many
/// entities, and a name that failed once would otherwise be re-fetched for
/// every entity sharing its chain.
#[derive(Debug, Default)]
pub struct SpriteCache {
    entries: DashMap<String, Arc<OnceCell<Option<String>>>>,
}

impl SpriteCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, name: &str) -> Arc<OnceCell<Option<String>>> {
        self.entries.entry(name.to_string()).or_default().clone()
    }
}

/// Flatten a tree-shaped evolution graph into an ordered name list.
///
/// Depth-first pre-order: each node's species name is recorded before its
/// children are visited, so the base form is always first and branching
/// evolutions appear in the order listed by the source data.
#[must_use]
pub fn flatten_chain(root: &ChainLink) -> Vec<String> {
    fn collect(link: &ChainLink, names: &mut Vec<String>) {
        names.push(link.species.name.clone());
        for next in &link.evolves_to {
            collect(next, names);
        }
    }

    let mut names = Vec::new();
    collect(root, &mut names);
    names
}

/// Resolve a chain URL to its ordered list of species names.
///
/// Returns the cached list when present. Otherwise fetches the chain
/// resource, flattens it pre-order, caches the result keyed by `chain_url`,
/// and returns it. On failure, logs a warning and returns an empty list; a
/// missing chain degrades that entity's evolutions display but must not
/// fail the surrounding batch.
pub async fn resolve_chain<A: PokeApi>(
    api: &A,
    chain_url: &str,
    cache: &ChainCache,
) -> Vec<String> {
    let cell = cache.cell(chain_url);
    let resolved = cell
        .get_or_try_init(|| async {
            let resource = api.fetch_evolution_chain(chain_url).await.map_err(|err| {
                PokedexError::ChainResolution {
                    url: chain_url.to_string(),
                    reason: err.to_string(),
                }
            })?;
            Ok::<_, PokedexError>(flatten_chain(&resource.chain))
        })
        .await;

    match resolved {
        Ok(names) => names.clone(),
        Err(err) => {
            warn!("{err}");
            Vec::new()
        }
    }
}

/// Resolve one evolution-stage name to `{name, sprite_url}`, memoized.
///
/// On cache miss, fetches the entity's base record by name to extract its
/// sprite URL. A failed lookup yields (and caches) a `None` sprite.
pub async fn resolve_stage<A: PokeApi>(
    api: &A,
    name: &str,
    cache: &SpriteCache,
) -> EvolutionStage {
    let cell = cache.cell(name);
    let sprite_url = cell
        .get_or_init(|| async {
            match api.fetch_pokemon_by_name(name).await {
                Ok(raw) => raw.sprites.front_default,
                Err(err) => {
                    warn!("sprite lookup for '{name}' failed: {err}");
                    None
                }
            }
        })
        .await
        .clone();

    EvolutionStage {
        name: name.to_string(),
        sprite_url,
    }
}

/// Resolve a list of stage names concurrently against the sprite cache.
pub async fn resolve_stages<A: PokeApi>(
    api: &A,
    names: &[String],
    cache: &SpriteCache,
) -> Vec<EvolutionStage> {
    join_all(names.iter().map(|name| resolve_stage(api, name, cache))).await
}
