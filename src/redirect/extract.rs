// src/redirect/extract.rs
// =============================================================================
// Pulls the username out of a profile href.
//
// Steps:
// 1. Relative hrefs are resolved against the site base (https://www.reddit.com/)
// 2. The result is parsed as a URL; a parse failure just means "no username"
// 3. The first `user` or `u` path segment is found; the segment after it
//    is the username
//
// This is looser than the classifier on purpose: it finds /user/x anywhere
// in the path. The classifier decides whether we get called at all.
// =============================================================================

use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

/// Returns the username in `href`, or None if there isn't one.
///
/// Never panics, never errors: malformed hrefs are logged at debug level and
/// give None.
///
/// Example:
///   site_base = "https://www.reddit.com/"
///   "/user/alice/posts" -> Some("alice")
///   "/r/rust"           -> None
pub fn extract_username(site_base: &Url, href: &str) -> Option<String> {
    let url = match resolve_href(site_base, href) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(href, error = %e, "could not parse href");
            return None;
        }
    };

    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());

    while let Some(segment) = segments.next() {
        if segment == "user" || segment == "u" {
            let name = segments.next()?;
            return Some(decode_segment(name));
        }
    }

    None
}

// Absolute hrefs parse on their own. Only a "relative URL without a base"
// error sends us to join(); any other parse error is final.
fn resolve_href(site_base: &Url, href: &str) -> Result<Url, ParseError> {
    match Url::parse(href) {
        Err(ParseError::RelativeUrlWithoutBase) => site_base.join(href),
        result => result,
    }
}

// Path segments come back percent-encoded ("j%C3%B6rg"); the search tool
// wants the plain name. A segment whose decoding is not valid UTF-8, or would
// contain a separator or whitespace, is returned exactly as written.
fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) if !decoded.contains(|c: char| c == '/' || c.is_whitespace() || c.is_control()) => {
            decoded.into_owned()
        }
        _ => segment.to_string(),
    }
}
