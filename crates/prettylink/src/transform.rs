//! Per-domain page-data transformers
//!
//! A transformer turns a [`PageData`] into the [`LinkData`] a template will
//! render. The registry maps fully-qualified domain names to transformers and
//! resolves lookups by longest suffix, so a rule registered for `example.com`
//! also covers `www.example.com` and `a.b.example.com`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LinkError;
use crate::page::{LinkData, PageData};

/// A rule for turning page data into link data, selected per domain
pub type Transformer = Arc<dyn Fn(&PageData) -> LinkData + Send + Sync>;

/// The registry key of the global fallback transformer
pub const DEFAULT_DOMAIN: &str = ".";

/// The built-in fallback rule: use the page title as link text, unless the
/// page has exactly one top-level heading, in which case use that heading.
/// A single h1 is usually the true headline, while `<title>` often carries a
/// site-name suffix.
pub fn default_transformer(page: &PageData) -> LinkData {
    let text = if page.top_level_headings().len() == 1 {
        page.main_heading()
    } else {
        page.title()
    };
    LinkData::with_text(page.url(), text)
}

/// Domain-to-transformer mapping with longest-suffix lookup.
///
/// Keys are held dot-terminated (`example.com.`) so that suffix matching is
/// unambiguous: `ample.com` can never match `example.com`. The registry
/// always contains a default entry under [`DEFAULT_DOMAIN`].
pub struct TransformerRegistry {
    by_domain: HashMap<String, Transformer>,
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformerRegistry {
    /// Create a registry holding only the default transformer
    pub fn new() -> Self {
        let mut by_domain: HashMap<String, Transformer> = HashMap::new();
        by_domain.insert(DEFAULT_DOMAIN.to_string(), Arc::new(default_transformer));
        Self { by_domain }
    }

    /// Register a transformer for a domain and every subdomain of it.
    ///
    /// The last registration for the same exact domain wins. Registering
    /// [`DEFAULT_DOMAIN`] replaces the global fallback.
    pub fn register<F>(&mut self, domain: &str, transformer: F) -> Result<(), LinkError>
    where
        F: Fn(&PageData) -> LinkData + Send + Sync + 'static,
    {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(LinkError::InvalidDomain);
        }
        self.by_domain
            .insert(canonical_domain(domain), Arc::new(transformer));
        Ok(())
    }

    /// Resolve the most specific transformer for a domain.
    ///
    /// Tries the dot-terminated domain itself, then strips one leading label
    /// at a time, and falls back to the default transformer once no labels
    /// remain. Never fails: an unregistered domain is not an error.
    pub fn resolve(&self, domain: &str) -> &Transformer {
        let mut current = canonical_domain(domain);
        loop {
            if let Some(transformer) = self.by_domain.get(&current) {
                return transformer;
            }
            match current.find('.') {
                // Strip the leftmost label, keeping the trailing separator
                Some(dot) if dot + 1 < current.len() => current = current.split_off(dot + 1),
                _ => break,
            }
        }
        self.by_domain
            .get(DEFAULT_DOMAIN)
            .expect("default transformer is always registered")
    }
}

/// Lowercase and dot-terminate a domain for use as a registry key
fn canonical_domain(domain: &str) -> String {
    let mut canonical = domain.trim().to_ascii_lowercase();
    if !canonical.ends_with('.') {
        canonical.push('.');
    }
    canonical
}
