//! The `pokedex theme` command: show or change the persisted theme flag.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::Preferences;

/// Show or change the dark/light theme preference.
///
/// The flag is the only durable state this tool keeps; it is read at
/// startup by the UI and written here on change.
#[derive(Debug, Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    action: Option<ThemeAction>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum ThemeAction {
    /// Print the current theme (default)
    Get,
    /// Switch to the dark theme
    Dark,
    /// Switch to the light theme
    Light,
    /// Flip between dark and light
    Toggle,
}

impl ThemeCommand {
    /// Apply the theme action against the preferences file.
    ///
    /// `config_path` overrides the resolved location (set from the
    /// global `--config` flag).
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let path = match config_path {
            Some(path) => path,
            None => Preferences::resolve_path()?,
        };

        let mut prefs = if path.exists() {
            Preferences::load_from(&path).await?
        } else {
            Preferences::default()
        };

        let action = self.action.unwrap_or(ThemeAction::Get);
        match action {
            ThemeAction::Get => {}
            ThemeAction::Dark => prefs.dark_mode = true,
            ThemeAction::Light => prefs.dark_mode = false,
            ThemeAction::Toggle => prefs.dark_mode = !prefs.dark_mode,
        }

        if !matches!(action, ThemeAction::Get) {
            prefs.save_to(&path).await?;
        }

        println!("{}", if prefs.dark_mode { "dark" } else { "light" });
        Ok(())
    }
}
