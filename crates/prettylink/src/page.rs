//! Page and link data snapshots
//!
//! [`PageData`] aggregates what we know about a fetched page; [`LinkData`] is
//! the resolved (url, text, description) triple a transformer produces and a
//! template consumes.

use serde::Serialize;
use url::Url;

use crate::error::LinkError;
use crate::render::{Field, Fields};

/// Data about a web page: its normalized URL, title, and section headings.
///
/// Constructed once per fetch; the fetcher populates title and headings via
/// the mutators, the rest of the pipeline only reads it.
#[derive(Debug, Clone)]
pub struct PageData {
    uri: Url,
    title: String,
    h1s: Vec<String>,
    h2s: Vec<String>,
}

impl PageData {
    /// Create page data for a URL. The URL is parsed and held in normalized
    /// form.
    pub fn new(url: &str) -> Result<Self, LinkError> {
        Ok(Self {
            uri: Url::parse(url)?,
            title: String::new(),
            h1s: Vec::new(),
            h2s: Vec::new(),
        })
    }

    /// The normalized URL as a string
    pub fn url(&self) -> &str {
        self.uri.as_str()
    }

    /// The URL in structured form
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The host part of the URL, empty if the URL has none
    pub fn hostname(&self) -> &str {
        self.uri.host_str().unwrap_or("")
    }

    /// The path part of the URL
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The page title, empty until populated
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The `h1` heading texts, in document order
    pub fn top_level_headings(&self) -> &[String] {
        &self.h1s
    }

    /// The `h2` heading texts, in document order
    pub fn secondary_headings(&self) -> &[String] {
        &self.h2s
    }

    /// The first `h1` text, falling back to the first `h2`, then to empty
    pub fn main_heading(&self) -> &str {
        self.h1s
            .first()
            .or_else(|| self.h2s.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn add_top_level_heading(&mut self, text: impl Into<String>) {
        self.h1s.push(text.into());
    }

    pub fn add_secondary_heading(&mut self, text: impl Into<String>) {
        self.h2s.push(text.into());
    }
}

/// The data available when rendering an output link.
///
/// Text defaults to the URL and description defaults to the text; both
/// defaults are resolved at construction and never recomputed. An empty
/// string counts as "not supplied".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkData {
    url: String,
    text: String,
    description: String,
}

impl LinkData {
    /// Link data with text and description both defaulting to the URL
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            text: url.clone(),
            description: url.clone(),
            url,
        }
    }

    /// Link data with explicit text; description defaults to the text
    pub fn with_text(url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        let text = text.into();
        if text.is_empty() {
            return Self::new(url);
        }
        Self {
            description: text.clone(),
            url,
            text,
        }
    }

    /// Link data with explicit text and description
    pub fn with_description(
        url: impl Into<String>,
        text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut link = Self::with_text(url, text);
        let description = description.into();
        if !description.is_empty() {
            link.description = description;
        }
        link
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Flattened view for template consumption, including the `uri.*`
    /// sub-parts derived from the URL
    pub fn fields(&self) -> Fields {
        template_fields(&self.url, &self.text, &self.description)
    }
}

/// Build the template field map from already-resolved field values.
///
/// `uri.hostname`, `uri.path` and `uri.hasPath` are derived from the URL
/// value; an unparseable URL yields empty sub-parts rather than an error.
pub fn template_fields(url: &str, text: &str, description: &str) -> Fields {
    let (hostname, path, has_path) = match Url::parse(url) {
        Ok(parsed) => {
            let path = parsed.path().to_string();
            let has_path = !path.is_empty() && path != "/";
            (
                parsed.host_str().unwrap_or("").to_string(),
                path,
                has_path,
            )
        }
        Err(_) => (String::new(), String::new(), false),
    };

    let mut fields = Fields::new();
    fields.insert("url".to_string(), Field::Str(url.to_string()));
    fields.insert("text".to_string(), Field::Str(text.to_string()));
    fields.insert(
        "description".to_string(),
        Field::Str(description.to_string()),
    );
    fields.insert("uri.hostname".to_string(), Field::Str(hostname));
    fields.insert("uri.path".to_string(), Field::Str(path));
    fields.insert("uri.hasPath".to_string(), Field::Bool(has_path));
    fields
}
