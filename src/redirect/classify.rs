// src/redirect/classify.rs
// =============================================================================
// Decides whether a link points at a user profile.
//
// We match the raw href attribute (not a resolved URL) against a fixed set of
// shapes:
//   /user/<name>            /u/<name>
//   /user/<name>/posts      /user/<name>/comments
//   https://[www.|old.]reddit.com/user/<name>   (and /u/<name>)
// Each shape allows one trailing slash. <name> is anything without a '/'.
//
// Anything else, e.g. /user/alice/posts/42, is left alone so the browser
// navigates normally.
//
// Rust concepts:
// - RegexSet: checks all patterns in a single pass over the string
// =============================================================================

use regex::RegexSet;

use super::node::DomNode;

// Scheme and host are case-insensitive, the path is not: the extractor only
// recognises lowercase `user` and `u`.
const PROFILE_PATTERNS: [&str; 5] = [
    r"^/(?:user|u)/[^/]+/?$",
    r"^/user/[^/]+/posts/?$",
    r"^/user/[^/]+/comments/?$",
    r"^(?i:https://(?:www\.)?reddit\.com)/(?:user|u)/[^/]+/?$",
    r"^(?i:https://(?:www\.)?old\.reddit\.com)/(?:user|u)/[^/]+/?$",
];

#[derive(Debug, Clone)]
pub struct LinkClassifier {
    patterns: RegexSet,
}

impl LinkClassifier {
    pub fn new() -> Self {
        // The patterns are compile-time literals covered by the tests
        let patterns = RegexSet::new(PROFILE_PATTERNS).expect("profile patterns are valid regexes");
        Self { patterns }
    }

    /// True if `node` is a hyperlink whose href has a profile shape
    pub fn is_profile_link<N: DomNode>(&self, node: &N) -> bool {
        node.is_hyperlink() && self.is_profile_href(node.href())
    }

    /// The href half of `is_profile_link`
    pub fn is_profile_href(&self, href: &str) -> bool {
        !href.is_empty() && self.patterns.is_match(href)
    }
}

impl Default for LinkClassifier {
    fn default() -> Self {
        Self::new()
    }
}
