// src/page/fetch.rs
// =============================================================================
// Loads the documents handed to `scan` and `click`.
//
// A source is either:
// - an http(s) URL, fetched with reqwest
// - a path to a local file
//
// Markdown vs HTML is decided by extension (.md / .markdown), everything else
// is parsed as HTML.
//
// Several sources are loaded concurrently with buffer_unordered, the same way
// a link checker fans out its requests.
// =============================================================================

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;

/// How a document's text should be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Markdown,
}

/// A loaded source document
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub kind: DocumentKind,
    pub body: String,
}

// Up to this many sources are loaded at once
const MAX_CONCURRENT_LOADS: usize = 8;

/// Builds the HTTP client shared by all loads
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .context("failed to create HTTP client")
}

/// Loads every source. Results come back in completion order, each paired
/// with the source it belongs to.
pub async fn load_documents(client: &Client, sources: Vec<String>) -> Vec<(String, Result<Document>)> {
    let futures = sources.into_iter().map(|source| async move {
        let result = load_document(client, &source).await;
        (source, result)
    });

    stream::iter(futures)
        .buffer_unordered(MAX_CONCURRENT_LOADS)
        .collect()
        .await
}

/// Loads a single source
pub async fn load_document(client: &Client, source: &str) -> Result<Document> {
    let kind = document_kind(source);

    let body = if is_remote(source) {
        fetch_page(client, source).await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read {}", source))?
    };

    tracing::debug!(source, bytes = body.len(), ?kind, "loaded document");

    Ok(Document {
        source: source.to_string(),
        kind,
        body,
    })
}

// Fetches a web page and returns its content
async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {} from {}", response.status(), url));
    }

    Ok(response.text().await?)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

// Looks at the extension of the path (ignoring any query string on URLs)
fn document_kind(source: &str) -> DocumentKind {
    let path = if is_remote(source) {
        url::Url::parse(source)
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    } else {
        source.to_string()
    };

    let extension = Path::new(&path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("md") | Some("markdown") => DocumentKind::Markdown,
        _ => DocumentKind::Html,
    }
}
