// src/error.rs
// =============================================================================
// Typed errors for the settings store and the redirect path.
//
// Command handlers in main.rs still use anyhow::Result; these enums are what
// the library-ish modules return so callers can tell failures apart.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to a settings store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access settings store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings store {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings store {path} must contain a JSON object")]
    NotAnObject { path: PathBuf },
}

/// Failures while handling a click, caught at the orchestrator boundary
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("failed to open {url}: {reason}")]
    Open { url: String, reason: String },
}
