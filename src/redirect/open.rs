// src/redirect/open.rs
// =============================================================================
// The host's "open a new browsing context" capability.
//
// In a browser this is window.open(url, "_blank"). The command-line host has
// no tabs, so StdoutOpener just prints the URL for the user (or a script) to
// pick up.
// =============================================================================

use std::io::Write;

use url::Url;

use crate::error::RedirectError;

pub trait Opener {
    /// Opens `url` in the browsing context named `target`
    fn open(&self, url: &Url, target: &str) -> Result<(), RedirectError>;
}

/// Prints the URL on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOpener {
    /// Print nothing; the caller reports the URL itself (--json output)
    pub quiet: bool,
}

impl Opener for StdoutOpener {
    fn open(&self, url: &Url, target: &str) -> Result<(), RedirectError> {
        tracing::debug!(%url, target, "opening redirect target");
        if self.quiet {
            return Ok(());
        }

        // A closed stdout (e.g. piped into `head`) is a failed open, not a panic
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "🔗 Opening in new tab ({}): {}", target, url).map_err(|e| {
            RedirectError::Open {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
