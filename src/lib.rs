// src/lib.rs
// =============================================================================
// Library root: the redirect core, usable by any host.
//
// A browser host wires its click listener to redirect::Redirector and its
// storage to settings::SettingsStore; the command-line host in main.rs does
// the same with files and stdout.
// =============================================================================

pub mod config; // fixed URLs and defaults
pub mod error; // typed errors
pub mod page; // loading documents and scanning them for profile links
pub mod redirect; // classify, extract, build, click handling
pub mod settings; // settings record, store and loader
