// src/redirect/click.rs
// =============================================================================
// Handles one click, from event target to opened redirect.
//
// The listener is registered in the capture phase at the document root, so it
// sees every click (including ones on content inserted after load) before the
// page's own handlers do. For each click:
//
// 1. Find the nearest <a> at or above the target. None -> ignore the click
// 2. Not a profile link -> ignore it, the browser navigates normally
// 3. Cancel the navigation and stop the event from propagating
// 4. Extract the username. None -> stop here (the click stays cancelled)
// 5. Load the settings, fresh for every click
// 6. Build the redirect URL
// 7. Open it in a new tab
//
// Errors from steps 2-7 never escape handle_click(): they are logged and
// reported as ClickOutcome::Failed.
// =============================================================================

use serde::Serialize;
use url::Url;

use super::build::build_redirect_url;
use super::classify::LinkClassifier;
use super::extract::extract_username;
use super::node::DomNode;
use super::open::Opener;
use crate::config::{RedirectConfig, NEW_TAB_TARGET};
use crate::error::RedirectError;
use crate::settings::{load_settings, SettingsStore};

/// A click being dispatched to our listener
#[derive(Debug, Clone)]
pub struct ClickEvent<N> {
    target: N,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<N> ClickEvent<N> {
    pub fn new(target: N) -> Self {
        Self {
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn target(&self) -> &N {
        &self.target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// What happened to a click
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The target is not inside a link
    NoLink,
    /// A link, but not a profile link; default navigation proceeds
    PassThrough { href: String },
    /// A profile link with no extractable username. Navigation was cancelled
    /// and nothing was opened.
    Suppressed { href: String },
    /// The redirect was opened
    Redirected {
        href: String,
        username: String,
        url: String,
    },
    /// Something failed after navigation was cancelled
    Failed { href: String, error: String },
}

impl ClickOutcome {
    pub fn is_redirected(&self) -> bool {
        matches!(self, ClickOutcome::Redirected { .. })
    }
}

/// The click listener: classifier, store and opener wired together
pub struct Redirector<S, O> {
    config: RedirectConfig,
    classifier: LinkClassifier,
    store: S,
    opener: O,
}

impl<S, O> Redirector<S, O>
where
    S: SettingsStore,
    O: Opener,
{
    pub fn new(config: RedirectConfig, store: S, opener: O) -> Self {
        Self {
            config,
            classifier: LinkClassifier::new(),
            store,
            opener,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Runs the listener for one click. Mutates `event` the way the browser
    /// listener would (prevent default + stop propagation) when it takes over.
    pub async fn handle_click<N>(&self, event: &mut ClickEvent<N>) -> ClickOutcome
    where
        N: DomNode + Clone,
    {
        let Some(link) = event.target().clone().closest_hyperlink() else {
            return ClickOutcome::NoLink;
        };

        let href = link.href().to_string();

        if !self.classifier.is_profile_link(&link) {
            tracing::trace!(href = %href, "not a profile link");
            return ClickOutcome::PassThrough { href };
        }

        event.prevent_default();
        event.stop_propagation();

        match self.redirect(&href).await {
            Ok(Some((username, url))) => {
                tracing::debug!(href = %href, username = %username, url = %url, "redirected profile link");
                ClickOutcome::Redirected {
                    href,
                    username,
                    url: url.to_string(),
                }
            }
            Ok(None) => {
                // TODO: fall back to the original navigation if product review
                // decides a swallowed click is a bug
                tracing::warn!(href = %href, "no username in profile link, click suppressed");
                ClickOutcome::Suppressed { href }
            }
            Err(e) => {
                tracing::error!(href = %href, error = %e, "failed to handle profile link click");
                ClickOutcome::Failed {
                    href,
                    error: e.to_string(),
                }
            }
        }
    }

    // Steps 4-7. Ok(None) means there was no username to redirect for.
    async fn redirect(&self, href: &str) -> Result<Option<(String, Url)>, RedirectError> {
        let Some(username) = extract_username(&self.config.site_base, href) else {
            return Ok(None);
        };

        let settings = load_settings(&self.store, &self.config.defaults).await;
        let url = build_redirect_url(&self.config.search_base, &username, &settings);

        self.opener.open(&url, NEW_TAB_TARGET)?;

        Ok(Some((username, url)))
    }
}
