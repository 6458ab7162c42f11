//! Core types and error handling for the pokedex client.
//!
//! This module hosts the error taxonomy shared by the whole crate:
//!
//! - [`PokedexError`] - strongly-typed error variants for all failure cases
//! - [`ErrorContext`] - wrapper that adds user-facing suggestions and details
//! - [`user_friendly_error`] - conversion from any [`anyhow::Error`] into a
//!   displayable [`ErrorContext`]
//!
//! # Propagation policy
//!
//! Failures strictly local to one entity (base fetch, species fetch, chain
//! resolution, sprite lookup) never propagate past their batch; they are
//! logged and replaced by documented default field values. Only identifier
//! enumeration failures ([`PokedexError::IndexFetch`]) are fatal to an
//! operation, and only an unmatched search term
//! ([`PokedexError::NotFound`]) is surfaced individually to the user.

pub mod error;

pub use error::{ErrorContext, PokedexError, user_friendly_error};
