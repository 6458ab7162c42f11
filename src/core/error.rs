//! Error handling for the pokedex client.
//!
//! The error system is designed around two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! It consists of two main types:
//! - [`PokedexError`] - enumerated error types for all failure cases
//! - [`ErrorContext`] - wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Enumeration**: [`PokedexError::IndexFetch`] - the identifier index is
//!   unreachable; fatal to whichever operation triggered it.
//! - **Per-item**: [`PokedexError::ItemFetch`] - one entity's fetch failed;
//!   recovered locally with defaulted fields, never fatal.
//! - **Evolution**: [`PokedexError::ChainResolution`] - an evolution chain is
//!   unreachable or malformed; recovered with an empty evolution list.
//! - **Search**: [`PokedexError::NotFound`] - an interactive search term does
//!   not match any entity; surfaced directly to the user.
//! - **Ambient**: HTTP, I/O, and config parse errors converted from
//!   [`reqwest::Error`], [`std::io::Error`], and [`toml::de::Error`].
//!
//! Use [`user_friendly_error`] to convert any error into a displayable
//! format with contextual suggestions.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for pokedex operations.
///
/// Each variant represents a specific failure mode with enough context to
/// decide whether the failure is fatal (enumeration), recoverable
/// (per-item), or user-facing (search miss).
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The identifier index endpoint is unreachable or returned a
    /// non-success status.
    ///
    /// This is fatal to the bulk-load path: without identifiers there is
    /// nothing to aggregate.
    #[error("Failed to list Pokémon identifiers: {reason}")]
    IndexFetch {
        /// Why the index request failed
        reason: String,
    },

    /// One entity's base/species/evolution/status fetch failed.
    ///
    /// Recovered locally by substituting default field values for that
    /// entity; never escalates past its batch.
    #[error("Failed to fetch data for Pokémon #{id}: {reason}")]
    ItemFetch {
        /// Identifier of the affected entity
        id: u32,
        /// Why the fetch failed
        reason: String,
    },

    /// An evolution chain resource is unreachable or malformed.
    ///
    /// Recovered by returning an empty evolution list for the affected
    /// entities.
    #[error("Failed to resolve evolution chain {url}: {reason}")]
    ChainResolution {
        /// URL of the chain resource
        url: String,
        /// Why resolution failed
        reason: String,
    },

    /// An interactive search term did not match any entity.
    #[error("No Pokémon matches '{term}'")]
    NotFound {
        /// The normalized search term
        term: String,
    },

    /// The remote API answered with a non-success HTTP status.
    #[error("API request to {url} failed with status {status}")]
    ApiStatus {
        /// The requested URL
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Preferences file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// HTTP transport error from [`reqwest`].
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error from [`std::io::Error`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error from the preferences file.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Error wrapper providing user-friendly context and suggestions.
///
/// Pairs a [`PokedexError`] with an optional suggestion (actionable next
/// step, shown green) and optional details (why it happened, shown yellow).
/// This is the shape the CLI presents to users on failure.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PokedexError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PokedexError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// Error message in red and bold, details in yellow, suggestion in
    /// green. This is the primary way the CLI presents errors.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("  {} {}", "Details:".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("  {} {}", "Suggestion:".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n  Details: {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Downcasts to [`PokedexError`] where possible and attaches suggestions
/// appropriate to the failure category; unknown errors fall back to a
/// generic network-shaped context so the CLI always has something
/// displayable.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<PokedexError>() {
        Ok(error) => return create_error_context(error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let kind = io_error.kind();
        return create_error_context(PokedexError::Io(std::io::Error::new(
            kind,
            io_error.to_string(),
        )));
    }

    ErrorContext::new(PokedexError::IndexFetch {
        reason: error.to_string(),
    })
    .with_suggestion("Check your network connection and try again")
}

fn create_error_context(error: PokedexError) -> ErrorContext {
    match &error {
        PokedexError::IndexFetch { .. } => ErrorContext::new(error)
            .with_details("The Pokédex cannot be loaded without the identifier index")
            .with_suggestion("Check your network connection and that the API base URL is reachable"),
        PokedexError::NotFound { term } => {
            let suggestion = format!(
                "Check the spelling of '{term}' or search by national dex number"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        PokedexError::ApiStatus { status, .. } if *status == 429 => ErrorContext::new(error)
            .with_details("The remote API is rate limiting requests")
            .with_suggestion("Wait a moment and retry, or reduce the batch size with --batch-size"),
        PokedexError::ApiStatus { .. } | PokedexError::Http(_) => ErrorContext::new(error)
            .with_suggestion("Check your network connection and try again"),
        PokedexError::Config { .. } | PokedexError::Toml(_) => ErrorContext::new(error)
            .with_suggestion("Fix or delete the preferences file; it will be recreated with defaults"),
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = PokedexError::IndexFetch {
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to list Pokémon identifiers: connection refused"
        );

        let err = PokedexError::ItemFetch {
            id: 25,
            reason: "HTTP 500".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch data for Pokémon #25: HTTP 500");

        let err = PokedexError::NotFound {
            term: "missingno".to_string(),
        };
        assert_eq!(err.to_string(), "No Pokémon matches 'missingno'");
    }

    #[test]
    fn error_context_builder() {
        let ctx = ErrorContext::new(PokedexError::NotFound {
            term: "mew2".to_string(),
        })
        .with_suggestion("Did you mean 'mewtwo'?")
        .with_details("Search terms must match an exact species name");

        assert!(ctx.suggestion.as_deref().unwrap().contains("mewtwo"));
        let rendered = format!("{ctx}");
        assert!(rendered.contains("No Pokémon matches 'mew2'"));
        assert!(rendered.contains("Suggestion:"));
        assert!(rendered.contains("Details:"));
    }

    #[test]
    fn user_friendly_error_downcasts_pokedex_errors() {
        let err = anyhow::Error::from(PokedexError::NotFound {
            term: "agumon".to_string(),
        });
        let ctx = user_friendly_error(err);
        assert!(matches!(ctx.error, PokedexError::NotFound { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn user_friendly_error_wraps_unknown_errors() {
        let ctx = user_friendly_error(anyhow::anyhow!("something odd"));
        assert!(matches!(ctx.error, PokedexError::IndexFetch { .. }));
        assert!(ctx.error.to_string().contains("something odd"));
    }

    #[test]
    fn rate_limit_status_gets_batch_size_suggestion() {
        let ctx = create_error_context(PokedexError::ApiStatus {
            url: "https://pokeapi.co/api/v2/pokemon/1".to_string(),
            status: 429,
        });
        assert!(ctx.suggestion.as_deref().unwrap().contains("--batch-size"));
    }
}
