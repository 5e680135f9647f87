// src/page/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// Reddit posts and comments are Markdown, and their author links look like
// [u/alice](/u/alice). We use `pulldown-cmark`, which parses Markdown into a
// stream of events; every Start(Link) event becomes one anchor.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

use crate::redirect::Anchor;

// Extracts every link destination from Markdown text
//
// Example input:
//   "Thanks [u/alice](/u/alice), see [docs](https://docs.rs)"
//
// Example output:
//   [Anchor("/u/alice"), Anchor("https://docs.rs")]
pub fn extract_markdown_anchors(markdown: &str) -> Vec<Anchor> {
    Parser::new(markdown)
        .filter_map(|event| match event {
            // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
            Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                Some(Anchor::new(dest_url.to_string()))
            }
            _ => None,
        })
        .collect()
}
