// src/settings/mod.rs
// =============================================================================
// User-configurable search settings.
//
// Submodules:
// - store: the key-value store trait plus JSON-file and in-memory backends
// - loader: reads the four keys with defaults, and writes them back
//
// This file holds the Settings record and its two enums.
// =============================================================================

mod loader;
mod store;

pub use loader::{load_settings, reset_settings, save_settings, SETTINGS_KEYS};
pub use store::{JsonFileStore, MemoryStore, SettingsStore, StoreRecord};

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Result ordering on the search tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Which kind of content the search tool lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Submissions,
    Comments,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Parses the stored string form; anything else is None
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Submissions => "submissions",
            SearchMode::Comments => "comments",
        }
    }

    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "submissions" => Some(SearchMode::Submissions),
            "comments" => Some(SearchMode::Comments),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of the search settings with every field populated.
///
/// Read fresh from the store for every redirect; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum number of results (always >= 1)
    pub limit: u32,
    pub sort: SortOrder,
    pub mode: SearchMode,
    /// Downstream search backend identifier
    pub backend: String,
}
