//! Interactive single-entity search.
//!
//! [`SearchSession`] wraps an [`Aggregator`] and a term cache: results are
//! keyed by the normalized (lower-cased, trimmed) search term and held for
//! the duration of the session, so repeated searches of the same term -
//! including arrivals via an evolution-stage navigation link - do not
//! refetch. The session shares the aggregator's chain and sprite caches,
//! so a search warms the same caches as a bulk load.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::aggregate::{Aggregator, CombinedPokemon};
use crate::api::PokeApi;
use crate::core::PokedexError;

/// One interactive session: an aggregator plus a result cache by term.
#[derive(Debug)]
pub struct SearchSession<A> {
    aggregator: Aggregator<A>,
    results: DashMap<String, Arc<CombinedPokemon>>,
}

impl<A: PokeApi> SearchSession<A> {
    /// Create a session with fresh caches.
    pub fn new(api: A) -> Self {
        Self {
            aggregator: Aggregator::new(api),
            results: DashMap::new(),
        }
    }

    /// The aggregator backing this session.
    pub const fn aggregator(&self) -> &Aggregator<A> {
        &self.aggregator
    }

    /// Normalize a search term: trimmed and lower-cased.
    #[must_use]
    pub fn normalize_term(term: &str) -> String {
        term.trim().to_lowercase()
    }

    /// Look up one entity by name (or dex number, which the base-data
    /// endpoint accepts on the same path).
    ///
    /// A cached result for the normalized term is returned without any
    /// network call. Otherwise the base record is fetched by name and
    /// combined through [`Aggregator::format_one`], and the result is
    /// cached under the normalized term.
    ///
    /// # Errors
    ///
    /// [`PokedexError::NotFound`] when the term matches no entity (the
    /// cache is left untouched); transport errors pass through unchanged.
    pub async fn lookup(&self, term: &str) -> Result<Arc<CombinedPokemon>, PokedexError> {
        let key = Self::normalize_term(term);
        if key.is_empty() {
            return Err(PokedexError::NotFound { term: key });
        }

        if let Some(hit) = self.results.get(&key) {
            debug!("search cache hit for '{key}'");
            return Ok(Arc::clone(hit.value()));
        }

        let raw = self.aggregator.api().fetch_pokemon_by_name(&key).await?;
        let record = Arc::new(self.aggregator.format_one(raw).await);
        self.results.insert(key, Arc::clone(&record));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{linear_chain, raw_pokemon, species_record, MockApi};
    use std::sync::atomic::Ordering;

    const CHAIN_URL: &str = "mock:///evolution-chain/10";

    fn session() -> SearchSession<MockApi> {
        let api = MockApi::new()
            .with_pokemon(raw_pokemon(4, "charmander", &["fire"]))
            .with_pokemon(raw_pokemon(5, "charmeleon", &["fire"]))
            .with_species(4, species_record(CHAIN_URL, "Obviously prefers hot places.", "red"))
            .with_chain(CHAIN_URL, linear_chain(&["charmander", "charmeleon"]));
        SearchSession::new(api)
    }

    #[tokio::test]
    async fn format_one_preserves_deterministic_raw_fields() {
        let session = session();
        let raw = raw_pokemon(4, "charmander", &["fire"]);
        let record = session.aggregator().format_one(raw.clone()).await;

        assert_eq!(record.id, raw.id);
        assert_eq!(record.name, raw.name);
        assert_eq!(record.types, vec!["fire"]);
        assert_eq!(record.abilities, vec!["overgrow"]);
        assert_eq!(record.height, raw.height);
        assert_eq!(record.weight, raw.weight);
        assert_eq!(record.sprite_url, raw.sprites.front_default);
        assert_eq!(record.stats.len(), raw.stats.len());
    }

    #[tokio::test]
    async fn lookup_combines_species_and_evolutions() {
        let session = session();
        let record = session.lookup("charmander").await.unwrap();

        assert_eq!(record.flavor_text, "Obviously prefers hot places.");
        assert_eq!(record.evolutions.len(), 2);
        assert_eq!(record.evolutions[0].name, "charmander");
        assert_eq!(record.evolutions[1].name, "charmeleon");
        assert!(record.evolutions[1].sprite_url.is_some());
        assert_eq!(record.generation, "generation-i");
    }

    #[tokio::test]
    async fn repeated_lookup_is_served_from_cache() {
        let session = session();
        let first = session.lookup("charmander").await.unwrap();
        let calls_after_first = session
            .aggregator()
            .api()
            .counters
            .pokemon_by_name
            .load(Ordering::SeqCst);

        // Different spellings of the same normalized term.
        let second = session.lookup("  CHARMANDER ").await.unwrap();
        let calls_after_second = session
            .aggregator()
            .api()
            .counters
            .pokemon_by_name
            .load(Ordering::SeqCst);

        assert_eq!(first, second);
        assert_eq!(calls_after_first, calls_after_second);
    }

    #[tokio::test]
    async fn unknown_term_is_not_found_and_not_cached() {
        let session = session();
        let err = session.lookup("agumon").await.unwrap_err();
        assert!(matches!(err, PokedexError::NotFound { ref term } if term == "agumon"));

        // The miss is not cached; a second lookup asks the API again.
        let _ = session.lookup("agumon").await.unwrap_err();
        assert_eq!(
            session
                .aggregator()
                .api()
                .counters
                .pokemon_by_name
                .load(Ordering::SeqCst),
            2
        );
    }

    #[tokio::test]
    async fn blank_term_is_not_found() {
        let session = session();
        let err = session.lookup("   ").await.unwrap_err();
        assert!(matches!(err, PokedexError::NotFound { .. }));
    }

    #[tokio::test]
    async fn missing_species_degrades_to_defaults() {
        let api = MockApi::new().with_pokemon(raw_pokemon(132, "ditto", &["normal"]));
        let session = SearchSession::new(api);

        let record = session.lookup("ditto").await.unwrap();
        assert_eq!(record.name, "ditto");
        assert_eq!(record.flavor_text, crate::constants::FLAVOR_TEXT_FALLBACK);
        assert!(record.evolutions.is_empty());
        assert_eq!(record.generation, crate::constants::UNKNOWN_GENERATION);
    }
}
