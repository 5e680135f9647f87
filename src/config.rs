// src/config.rs
// =============================================================================
// Fixed configuration for the redirect path.
//
// Everything that used to be a hard-coded constant lives in one immutable
// struct that gets passed to the classifier, loader, builder and
// orchestrator. Tests build their own RedirectConfig with whatever base URLs
// they want instead of patching globals.
//
// Rust concepts:
// - Default trait: the production values
// - Clone: the config is small, handlers keep their own copy
// =============================================================================

use std::path::PathBuf;

use url::Url;

use crate::settings::{SearchMode, Settings, SortOrder};

/// Where the search tool lives. The redirect query is appended to this.
pub const SEARCH_BASE_URL: &str = "https://ihsoyct.github.io/";

/// Relative hrefs on the page are resolved against this origin.
pub const SITE_BASE_URL: &str = "https://www.reddit.com/";

/// Window name handed to the opener (a new browsing context).
pub const NEW_TAB_TARGET: &str = "_blank";

/// Where the settings file lives unless --store says otherwise:
/// `<config dir>/reddit-user-redirect/settings.json`
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reddit-user-redirect").join("settings.json"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectConfig {
    /// Destination origin for redirects
    pub search_base: Url,
    /// Canonical site origin used to resolve relative profile hrefs
    pub site_base: Url,
    /// Values substituted for absent or falsy stored settings
    pub defaults: Settings,
}

impl RedirectConfig {
    pub fn new(search_base: Url, site_base: Url, defaults: Settings) -> Self {
        Self {
            search_base,
            site_base,
            defaults,
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        // Both constants are literals checked by the tests below
        let search_base = Url::parse(SEARCH_BASE_URL).expect("SEARCH_BASE_URL is a valid URL");
        let site_base = Url::parse(SITE_BASE_URL).expect("SITE_BASE_URL is a valid URL");

        Self {
            search_base,
            site_base,
            defaults: Settings {
                limit: 100,
                sort: SortOrder::Desc,
                mode: SearchMode::Submissions,
                backend: "artic_shift".to_string(),
            },
        }
    }
}
