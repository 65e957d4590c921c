//! Data-directory resolution and optional user configuration.
//!
//! The database lives in a per-user config directory created on first run.
//! An optional `config.toml` alongside it overrides the default category
//! and the category color table used by the table renderer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::task::DEFAULT_CATEGORY;

/// Directory under the user's config dir holding the database and config.
pub const APP_DIR: &str = "tasktrack";

/// Database file name.
pub const DB_FILE: &str = "task_list.db";

/// Optional user configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// User-tunable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Category used when `add` is given none. Uppercased on use.
    pub default_category: String,

    /// Map of lowercase category name to a color name understood by the
    /// terminal (e.g. `"red"`, `"bright cyan"`). Unknown categories render
    /// white.
    pub colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let colors = [
            ("priority", "red"),
            ("learn", "green"),
            ("ideas", "yellow"),
            ("reminders", "bright red"),
            ("study", "cyan"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            colors,
        }
    }
}

impl Config {
    /// Load `config.toml` from `dir`, falling back to defaults when absent.
    ///
    /// A present-but-malformed file is a fatal configuration error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| TrackerError::config_with_path(e.to_string(), path.clone()))?;
        toml::from_str(&raw).map_err(|e| TrackerError::config_with_path(e.to_string(), path))
    }

    /// Color for a category cell; white for categories without an entry.
    #[must_use]
    pub fn color_for(&self, category: &str) -> Color {
        match self.colors.get(&category.to_lowercase()) {
            Some(name) => Color::from(name.as_str()),
            None => Color::White,
        }
    }
}

/// Per-user data directory (`~/.config/tasktrack` on Linux).
pub fn data_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| TrackerError::config("could not determine a user config directory"))
}

/// Default database path inside the data directory.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE))
}
