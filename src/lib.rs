//! Pokédex aggregation client.
//!
//! Fetches Pokémon data (stats, types, evolutions, sprites, flavor text)
//! from a public REST API and combines it into one canonical record per
//! Pokémon. The hard part is the aggregation pipeline: multiple batched
//! endpoints are fetched concurrently, merged by identifier, memoized
//! where resources are shared, and tolerant of partial failures per item
//! without aborting the whole run.
//!
//! # Architecture Overview
//!
//! Data flows one-directionally:
//!
//! ```text
//! identifier listing -> batch fetcher -> aggregator -> presentation
//!                            |                |
//!                       chain cache      sprite cache
//! ```
//!
//! - [`api`] - wire models and the [`api::PokeApi`] trait seam with its
//!   `reqwest`-backed implementation
//! - [`fetch`] - batched concurrent fetching: sequential fixed-size
//!   batches, concurrent items, per-item failures captured as tagged
//!   outcomes
//! - [`evolution`] - evolution-chain flattening and session-scoped chain
//!   and sprite caches with at-most-once fetch per key
//! - [`aggregate`] - the join step producing
//!   [`aggregate::CombinedPokemon`], and the shared single-entity
//!   formatting path
//! - [`search`] - interactive lookup with a per-session term cache
//! - [`config`] - the persisted theme preference (the only durable state)
//! - [`cli`] - thin presentation collaborator rendering records as JSON
//!   or text
//! - [`core`] - error taxonomy and user-facing error contexts
//!
//! # Failure model
//!
//! Only identifier enumeration failures are fatal. Everything narrower -
//! one entity's base or species fetch, an evolution chain, a sprite
//! lookup - is absorbed where it happens and replaced by documented
//! default field values, so one bad entity never costs the rest of the
//! batch. See [`core::PokedexError`] for the full taxonomy.
//!
//! # Example
//!
//! ```rust,no_run
//! use pokedex_cli::aggregate::Aggregator;
//! use pokedex_cli::api::HttpPokeApi;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let aggregator = Aggregator::new(HttpPokeApi::new()?);
//! let records = aggregator.build_combined_records(151, 50).await?;
//! assert_eq!(records.len(), 151);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod evolution;
pub mod fetch;
pub mod search;

// test_utils is available to unit tests and, via the `test-utils` feature,
// to integration tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
