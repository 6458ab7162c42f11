//! User preferences for the pokedex CLI.
//!
//! The only durable state this tool keeps is one boolean: the dark/light
//! theme flag. It lives in a small TOML file at a platform-appropriate
//! location, read at startup and written when the theme is changed.
//! Nothing fetched from the remote API is ever persisted.
//!
//! # File location
//!
//! - **Unix/macOS**: `~/.pokedex/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\pokedex\config.toml`
//!
//! The location can be overridden with the `POKEDEX_CONFIG` environment
//! variable or, at a higher precedence, the CLI's `--config` flag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Persisted user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the dark theme is enabled. Defaults to light.
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    /// Load preferences from the resolved location, or defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::resolve_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load preferences from a specific file path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read preferences from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences from {}", path.display()))
    }

    /// Save preferences to the resolved location, creating parent
    /// directories as needed.
    pub async fn save(&self) -> Result<()> {
        let path = Self::resolve_path()?;
        self.save_to(&path).await
    }

    /// Save preferences to a specific file path.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize preferences")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }

    /// Resolve the preferences file path: `POKEDEX_CONFIG` override first,
    /// then the platform default.
    pub fn resolve_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("POKEDEX_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        Self::default_path()
    }

    /// The platform-default preferences file path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("pokedex")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".pokedex")
        };

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let prefs = Preferences { dark_mode: true };
        prefs.save_to(&path).await.unwrap();

        let loaded = Preferences::load_from(&path).await.unwrap();
        assert_eq!(loaded, prefs);
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("config.toml");

        Preferences::default().save_to(&path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn missing_fields_default_to_light() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "").await.unwrap();

        let loaded = Preferences::load_from(&path).await.unwrap();
        assert!(!loaded.dark_mode);
    }

    #[tokio::test]
    async fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "dark_mode = maybe").await.unwrap();

        assert!(Preferences::load_from(&path).await.is_err());
    }
}
