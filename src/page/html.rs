// src/page/html.rs
// =============================================================================
// This module pulls anchors out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker we keep every <a>, even ones without an href and
// ones that are relative. The classifier wants the raw attribute exactly as
// the page wrote it, so nothing is resolved here.
// =============================================================================

use scraper::{Html, Selector};

use crate::redirect::{Anchor, DomNode};

// Extracts every <a> element from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: one Anchor per <a>, in document order
//
// Example:
//   html = "<a href='/u/bob'>bob</a><a>no href</a>"
//   result = [Anchor("/u/bob"), Anchor(no href)]
pub fn extract_html_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    // "a" is a constant, known-valid selector
    let selector = Selector::parse("a").expect("'a' is a valid selector");

    document
        .select(&selector)
        .map(|element| {
            Anchor::element(
                element.tag_name(),
                element.attr("href").map(str::to_string),
            )
        })
        .collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not select "a[href]" like a link checker would?
//    - A missing href is read as "" and simply doesn't classify
//    - Keeping those anchors makes the scan count match what a user can click
//
// 2. Why convert ElementRef into Anchor?
//    - ElementRef borrows the parsed document
//    - Anchor owns its strings, so results can outlive the Html value
// -----------------------------------------------------------------------------
