//! Test utilities for the pokedex client.
//!
//! Provides [`MockApi`], a programmable in-memory [`PokeApi`] double, plus
//! fixture builders for raw records, species, and evolution chains. The
//! mock counts calls per endpoint so tests can assert cache behavior
//! (exactly-one-fetch properties) and supports per-identifier failure
//! injection so partial-failure handling can be exercised without a
//! network.
//!
//! Available to unit tests and, via the `test-utils` cargo feature, to the
//! integration tests under `tests/`.

use std::collections::{HashMap, HashSet};
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::api::models::{
    AbilitySlot, ChainLink, EvolutionChainResource, FlavorTextEntry, IndexResponse, NamedResource,
    RawPokemon, ResourceRef, Species, Sprites, StatSlot, TypeSlot,
};
use crate::api::PokeApi;
use crate::core::PokedexError;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Initializes the tracing subscriber once regardless of how many times it
/// is called. Respects `RUST_LOG` if set, otherwise uses the provided
/// level; does nothing when neither is available.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Per-endpoint call counters for cache and batching assertions.
#[derive(Debug, Default)]
pub struct CallCounters {
    /// Calls to the index endpoint
    pub index: AtomicUsize,
    /// Calls to the base-data endpoint by id
    pub pokemon: AtomicUsize,
    /// Calls to the base-data endpoint by name
    pub pokemon_by_name: AtomicUsize,
    /// Calls to the species endpoint
    pub species: AtomicUsize,
    /// Calls to evolution-chain resources
    pub chains: AtomicUsize,
}

/// Programmable in-memory implementation of [`PokeApi`].
///
/// Unknown identifiers and names answer with 404-shaped errors, matching
/// the HTTP client's behavior. Failure injection simulates transport
/// errors per id or name.
#[derive(Debug, Default)]
pub struct MockApi {
    index_count: u32,
    fail_index: bool,
    pokemon: HashMap<u32, RawPokemon>,
    species: HashMap<u32, Species>,
    chains: HashMap<String, EvolutionChainResource>,
    fail_pokemon: HashSet<u32>,
    fail_species: HashSet<u32>,
    fail_names: HashSet<String>,
    /// Observed call counts, for assertions
    pub counters: CallCounters,
}

impl MockApi {
    /// Create an empty mock with no known entities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total count reported by the index endpoint.
    #[must_use]
    pub fn with_index_count(mut self, count: u32) -> Self {
        self.index_count = count;
        self
    }

    /// Make the index endpoint fail with a 503.
    #[must_use]
    pub fn with_failing_index(mut self) -> Self {
        self.fail_index = true;
        self
    }

    /// Register a base record, addressable by id and by name.
    #[must_use]
    pub fn with_pokemon(mut self, raw: RawPokemon) -> Self {
        self.pokemon.insert(raw.id, raw);
        self
    }

    /// Register a species record for an id.
    #[must_use]
    pub fn with_species(mut self, id: u32, species: Species) -> Self {
        self.species.insert(id, species);
        self
    }

    /// Register an evolution-chain resource under a URL.
    #[must_use]
    pub fn with_chain(mut self, url: &str, chain: EvolutionChainResource) -> Self {
        self.chains.insert(url.to_string(), chain);
        self
    }

    /// Make base-data fetches for `id` fail with a 500.
    #[must_use]
    pub fn with_failing_pokemon(mut self, id: u32) -> Self {
        self.fail_pokemon.insert(id);
        self
    }

    /// Make species fetches for `id` fail with a 500.
    #[must_use]
    pub fn with_failing_species(mut self, id: u32) -> Self {
        self.fail_species.insert(id);
        self
    }

    /// Make by-name fetches for `name` fail with a 500.
    #[must_use]
    pub fn with_failing_name(mut self, name: &str) -> Self {
        self.fail_names.insert(name.to_string());
        self
    }

    fn status_error(url: String, status: u16) -> PokedexError {
        PokedexError::ApiStatus { url, status }
    }
}

impl PokeApi for MockApi {
    async fn fetch_index(&self, limit: u32) -> Result<IndexResponse, PokedexError> {
        self.counters.index.fetch_add(1, Ordering::SeqCst);
        if self.fail_index {
            return Err(Self::status_error("mock:///pokemon".to_string(), 503));
        }
        let listed = self.index_count.min(limit) as usize;
        let results = (1..=listed as u32)
            .map(|id| NamedResource {
                name: self
                    .pokemon
                    .get(&id)
                    .map_or_else(|| format!("pokemon-{id}"), |raw| raw.name.clone()),
            })
            .collect();
        Ok(IndexResponse {
            count: self.index_count,
            results,
        })
    }

    async fn fetch_pokemon(&self, id: u32) -> Result<RawPokemon, PokedexError> {
        self.counters.pokemon.fetch_add(1, Ordering::SeqCst);
        if self.fail_pokemon.contains(&id) {
            return Err(Self::status_error(format!("mock:///pokemon/{id}"), 500));
        }
        self.pokemon
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::status_error(format!("mock:///pokemon/{id}"), 404))
    }

    async fn fetch_pokemon_by_name(&self, name: &str) -> Result<RawPokemon, PokedexError> {
        self.counters.pokemon_by_name.fetch_add(1, Ordering::SeqCst);
        if self.fail_names.contains(name) {
            return Err(Self::status_error(format!("mock:///pokemon/{name}"), 500));
        }
        self.pokemon
            .values()
            .find(|raw| raw.name == name)
            .cloned()
            .ok_or_else(|| PokedexError::NotFound {
                term: name.to_string(),
            })
    }

    async fn fetch_species(&self, id: u32) -> Result<Species, PokedexError> {
        self.counters.species.fetch_add(1, Ordering::SeqCst);
        if self.fail_species.contains(&id) {
            return Err(Self::status_error(
                format!("mock:///pokemon-species/{id}"),
                500,
            ));
        }
        self.species
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::status_error(format!("mock:///pokemon-species/{id}"), 404))
    }

    async fn fetch_evolution_chain(
        &self,
        url: &str,
    ) -> Result<EvolutionChainResource, PokedexError> {
        self.counters.chains.fetch_add(1, Ordering::SeqCst);
        self.chains
            .get(url)
            .cloned()
            .ok_or_else(|| Self::status_error(url.to_string(), 404))
    }
}

/// Build a base record fixture with a sprite, one visible and one hidden
/// ability, and an hp/attack/speed stat line.
#[must_use]
pub fn raw_pokemon(id: u32, name: &str, types: &[&str]) -> RawPokemon {
    RawPokemon {
        id,
        name: name.to_string(),
        height: Some(7),
        weight: Some(69),
        sprites: Sprites {
            front_default: Some(format!("mock:///sprites/{id}.png")),
        },
        abilities: vec![
            AbilitySlot {
                ability: NamedResource {
                    name: "overgrow".to_string(),
                },
                is_hidden: false,
            },
            AbilitySlot {
                ability: NamedResource {
                    name: "chlorophyll".to_string(),
                },
                is_hidden: true,
            },
        ],
        types: types
            .iter()
            .map(|name| TypeSlot {
                type_: NamedResource {
                    name: (*name).to_string(),
                },
            })
            .collect(),
        stats: [("hp", 45), ("attack", 49), ("speed", 45)]
            .into_iter()
            .map(|(name, base_stat)| StatSlot {
                base_stat,
                stat: NamedResource {
                    name: name.to_string(),
                },
            })
            .collect(),
    }
}

/// Build a species fixture referencing `chain_url`, with English flavor
/// text tagged by `version` and a generation label.
#[must_use]
pub fn species_record(chain_url: &str, flavor: &str, version: &str) -> Species {
    Species {
        flavor_text_entries: vec![
            FlavorTextEntry {
                flavor_text: "texte en français".to_string(),
                language: NamedResource {
                    name: "fr".to_string(),
                },
                version: Some(NamedResource {
                    name: version.to_string(),
                }),
            },
            FlavorTextEntry {
                flavor_text: flavor.to_string(),
                language: NamedResource {
                    name: "en".to_string(),
                },
                version: Some(NamedResource {
                    name: version.to_string(),
                }),
            },
        ],
        evolution_chain: Some(ResourceRef {
            url: chain_url.to_string(),
        }),
        is_legendary: false,
        is_mythical: false,
        is_baby: false,
        generation: Some(NamedResource {
            name: "generation-i".to_string(),
        }),
    }
}

/// Build a linear evolution chain from an ordered name list.
#[must_use]
pub fn linear_chain(names: &[&str]) -> EvolutionChainResource {
    fn build(names: &[&str]) -> ChainLink {
        ChainLink {
            species: NamedResource {
                name: names[0].to_string(),
            },
            evolves_to: if names.len() > 1 {
                vec![build(&names[1..])]
            } else {
                Vec::new()
            },
        }
    }

    assert!(!names.is_empty(), "a chain needs at least a base form");
    EvolutionChainResource {
        chain: build(names),
    }
}

/// Build a branching chain: `root` evolves into one linear path per branch.
#[must_use]
pub fn branching_chain(root: &str, branches: &[&[&str]]) -> EvolutionChainResource {
    EvolutionChainResource {
        chain: ChainLink {
            species: NamedResource {
                name: root.to_string(),
            },
            evolves_to: branches
                .iter()
                .map(|branch| linear_chain(branch).chain)
                .collect(),
        },
    }
}
