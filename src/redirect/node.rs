// src/redirect/node.rs
// =============================================================================
// The DOM-like nodes clicks are delivered to.
//
// The classifier only needs three things from an element: its tag name, an
// attribute lookup, and a way to walk up to its parent. We put those behind a
// trait and implement it for:
// - scraper::ElementRef, a real parsed HTML element
// - Anchor, a bare link built from an href string
// =============================================================================

use scraper::ElementRef;

pub trait DomNode: Sized {
    /// Tag name as the parser reports it (case is not significant)
    fn tag_name(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    fn parent_element(&self) -> Option<Self>;

    /// True for `<a>` elements
    fn is_hyperlink(&self) -> bool {
        self.tag_name().eq_ignore_ascii_case("a")
    }

    /// The href attribute, with a missing attribute read as ""
    fn href(&self) -> &str {
        self.attr("href").unwrap_or("")
    }

    /// Nearest hyperlink at or above this node, like `Element.closest("a")`
    fn closest_hyperlink(self) -> Option<Self> {
        let mut current = Some(self);
        while let Some(node) = current {
            if node.is_hyperlink() {
                return Some(node);
            }
            current = node.parent_element();
        }
        None
    }
}

impl<'a> DomNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }
}

/// A standalone anchor element with no parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    tag: String,
    href: Option<String>,
}

impl Anchor {
    /// `<a href="...">`
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            tag: "a".to_string(),
            href: Some(href.into()),
        }
    }

    /// Any element, with or without an href
    pub fn element(tag: impl Into<String>, href: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            href,
        }
    }
}

impl DomNode for Anchor {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "href" => self.href.as_deref(),
            _ => None,
        }
    }

    fn parent_element(&self) -> Option<Self> {
        None
    }
}
