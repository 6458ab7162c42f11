//! Remote API access for the pokedex client.
//!
//! This module owns the consumed half of the external interface: the
//! PokéAPI-shaped REST endpoints that provide base data, species data, and
//! evolution chains. It is split into:
//!
//! - [`models`] - serde types mirroring the wire format of each endpoint
//! - [`client`] - the [`PokeApi`] trait seam and its [`HttpPokeApi`]
//!   implementation backed by [`reqwest`]
//!
//! All requests are plain HTTPS GET with JSON responses and no
//! authentication. The trait seam exists so the aggregation logic can be
//! exercised against an in-memory double instead of the network.

pub mod client;
pub mod models;

pub use client::{HttpPokeApi, PokeApi};
pub use models::{
    AbilitySlot, ChainLink, EvolutionChainResource, FlavorTextEntry, IndexResponse, NamedResource,
    RawPokemon, ResourceRef, Species, Sprites, StatSlot, TypeSlot,
};
