// src/redirect/mod.rs
// =============================================================================
// This module contains the redirect logic itself.
//
// Submodules:
// - node: the DOM-like node trait clicks are delivered to
// - classify: is this link a user profile link?
// - extract: which user does it point at?
// - build: the search tool URL for that user
// - open: the host's "open in a new tab" capability
// - click: the click listener tying it all together
//
// Everything except click/open is pure and synchronous.
// =============================================================================

mod build;
mod classify;
mod click;
mod extract;
mod node;
mod open;

pub use build::build_redirect_url;
pub use classify::LinkClassifier;
pub use click::{ClickEvent, ClickOutcome, Redirector};
pub use extract::extract_username;
pub use node::{Anchor, DomNode};
pub use open::{Opener, StdoutOpener};
