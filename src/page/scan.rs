// src/page/scan.rs
// =============================================================================
// Finds the profile links in a document and works out where each would
// redirect.
//
// This runs the same classify -> extract -> build steps as a click, minus the
// opening, for every anchor in the document at once.
// =============================================================================

use serde::Serialize;

use super::fetch::{Document, DocumentKind};
use super::html::extract_html_anchors;
use super::markdown::extract_markdown_anchors;
use crate::config::RedirectConfig;
use crate::redirect::{build_redirect_url, extract_username, DomNode, LinkClassifier};
use crate::settings::Settings;

/// One profile link found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileLink {
    /// Document the link was found in
    pub source: String,
    /// The href exactly as written
    pub href: String,
    /// None when the href looks like a profile link but names nobody
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Summary of one document
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source: String,
    /// Number of anchors looked at
    pub anchors: usize,
    pub profile_links: Vec<ProfileLink>,
}

pub fn scan_document(
    document: &Document,
    classifier: &LinkClassifier,
    config: &RedirectConfig,
    settings: &Settings,
) -> ScanReport {
    let anchors = match document.kind {
        DocumentKind::Html => extract_html_anchors(&document.body),
        DocumentKind::Markdown => extract_markdown_anchors(&document.body),
    };

    let profile_links = anchors
        .iter()
        .filter(|anchor| classifier.is_profile_link(*anchor))
        .map(|anchor| {
            let href = anchor.href().to_string();
            let username = extract_username(&config.site_base, &href);
            let redirect = username
                .as_deref()
                .map(|name| build_redirect_url(&config.search_base, name, settings).to_string());

            ProfileLink {
                source: document.source.clone(),
                href,
                username,
                redirect,
            }
        })
        .collect();

    ScanReport {
        source: document.source.clone(),
        anchors: anchors.len(),
        profile_links,
    }
}
