// src/page/mod.rs
// =============================================================================
// This module reads pages and finds the profile links in them.
//
// Submodules:
// - fetch: loads documents from files or URLs
// - html: extracts anchors from HTML
// - markdown: extracts links from Markdown
// - scan: classifies those anchors and builds their redirect URLs
// =============================================================================

mod fetch;
mod html;
mod markdown;
mod scan;

pub use fetch::{http_client, load_document, load_documents, Document, DocumentKind};
pub use scan::{scan_document, ProfileLink, ScanReport};
