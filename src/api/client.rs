//! HTTP client for the remote Pokémon REST API.
//!
//! [`PokeApi`] is the seam between the aggregation logic and the network:
//! every endpoint the aggregator touches is a method on this trait, so the
//! whole pipeline can run against `test_utils::MockApi` in tests. The
//! production implementation, [`HttpPokeApi`], wraps a [`reqwest::Client`]
//! with a per-request timeout and maps non-success statuses to typed errors.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::models::{EvolutionChainResource, IndexResponse, RawPokemon, Species};
use crate::constants::{DEFAULT_API_BASE_URL, REQUEST_TIMEOUT};
use crate::core::PokedexError;

/// Access to the remote Pokémon data API.
///
/// One method per consumed endpoint. Implementations must be cheap to share
/// by reference across concurrent per-item futures; [`HttpPokeApi`] clones
/// its inner `reqwest::Client` handle, which is an `Arc` internally.
#[allow(async_fn_in_trait)]
pub trait PokeApi: Send + Sync {
    /// Fetch the index/listing endpoint, requesting up to `limit` entries.
    async fn fetch_index(&self, limit: u32) -> Result<IndexResponse, PokedexError>;

    /// Fetch the base record for one identifier.
    async fn fetch_pokemon(&self, id: u32) -> Result<RawPokemon, PokedexError>;

    /// Fetch the base record by species name.
    ///
    /// A missing name maps to [`PokedexError::NotFound`] so interactive
    /// search can distinguish "no such Pokémon" from transport failures.
    async fn fetch_pokemon_by_name(&self, name: &str) -> Result<RawPokemon, PokedexError>;

    /// Fetch the species record for one identifier.
    async fn fetch_species(&self, id: u32) -> Result<Species, PokedexError>;

    /// Fetch an evolution-chain resource by its absolute URL.
    async fn fetch_evolution_chain(&self, url: &str)
    -> Result<EvolutionChainResource, PokedexError>;
}

/// [`PokeApi`] implementation backed by HTTPS GET requests.
#[derive(Debug, Clone)]
pub struct HttpPokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPokeApi {
    /// Create a client against the default API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, PokedexError> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    /// Create a client against a custom base URL (mirrors, test servers).
    ///
    /// Trailing slashes are stripped so endpoint paths join cleanly.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, PokedexError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The base URL this client resolves endpoint paths against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PokedexError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::ApiStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl PokeApi for HttpPokeApi {
    async fn fetch_index(&self, limit: u32) -> Result<IndexResponse, PokedexError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        self.get_json(&url).await
    }

    async fn fetch_pokemon(&self, id: u32) -> Result<RawPokemon, PokedexError> {
        let url = format!("{}/pokemon/{id}", self.base_url);
        self.get_json(&url).await
    }

    async fn fetch_pokemon_by_name(&self, name: &str) -> Result<RawPokemon, PokedexError> {
        let url = format!("{}/pokemon/{name}", self.base_url);
        match self.get_json(&url).await {
            Err(PokedexError::ApiStatus { status: 404, .. }) => Err(PokedexError::NotFound {
                term: name.to_string(),
            }),
            other => other,
        }
    }

    async fn fetch_species(&self, id: u32) -> Result<Species, PokedexError> {
        let url = format!("{}/pokemon-species/{id}", self.base_url);
        self.get_json(&url).await
    }

    async fn fetch_evolution_chain(
        &self,
        url: &str,
    ) -> Result<EvolutionChainResource, PokedexError> {
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let api = HttpPokeApi::with_base_url("https://pokeapi.co/api/v2/").unwrap();
        assert_eq!(api.base_url(), "https://pokeapi.co/api/v2");
    }

    #[test]
    fn default_client_uses_default_base_url() {
        let api = HttpPokeApi::new().unwrap();
        assert_eq!(api.base_url(), DEFAULT_API_BASE_URL);
    }
}
