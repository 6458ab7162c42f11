//! Global constants used throughout the pokedex codebase.
//!
//! This module contains endpoint defaults, batching parameters, timeout
//! durations, and flavor-text selection preferences that are used across
//! multiple modules. Defining them centrally improves maintainability and
//! makes magic numbers more discoverable.

use std::time::Duration;

/// Default base URL for the remote Pokémon REST API.
///
/// All endpoint paths (`/pokemon`, `/pokemon-species`, evolution chain
/// resources) are resolved relative to this URL. The base is configurable
/// on [`crate::api::HttpPokeApi`] so mirrors can be substituted.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Highest entity identifier considered valid.
///
/// The index endpoint can report forms and variants beyond the national
/// dex range; identifiers above this bound are discarded when listing.
pub const MAX_ENTITY_ID: u32 = 1010;

/// Default number of entities loaded by a bulk fetch (the original Kanto dex).
pub const DEFAULT_FETCH_LIMIT: u32 = 151;

/// Number of identifiers fetched concurrently per batch.
///
/// Batches are processed strictly sequentially; items within a batch are
/// issued together. Larger batches increase throughput but risk rate
/// limiting by the remote API.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Fixed throttle delay applied before each batch (50ms).
///
/// This is a pacing delay to avoid hammering the remote API, not an
/// adaptive backoff.
pub fn batch_delay() -> Duration {
    Duration::from_millis(50)
}

/// Timeout applied to every individual HTTP request (10 seconds).
///
/// A timed-out request is classified as a per-item failure and absorbed
/// by the batch fetcher like any other item error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for a whole batch awaited with `join_all` (60 seconds).
///
/// This prevents indefinite blocking when batch futures hang. An expired
/// batch yields error outcomes for its identifiers and the loop continues.
pub fn batch_operation_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Preferred language for flavor-text selection.
pub const FLAVOR_TEXT_LANGUAGE: &str = "en";

/// Preferred game version for flavor-text selection.
///
/// Entries tagged with this version win over other entries in the
/// preferred language.
pub const FLAVOR_TEXT_VERSION: &str = "red";

/// Literal fallback when no flavor text matches the preference order.
pub const FLAVOR_TEXT_FALLBACK: &str = "No description available.";

/// Default generation label when species data is unavailable.
pub const UNKNOWN_GENERATION: &str = "unknown";
