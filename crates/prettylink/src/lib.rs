//! PrettyLink - turn web page URLs into pretty formatted links
//!
//! This crate fetches a web page, extracts its title and headings, picks the
//! link text through a per-domain transformer, and renders a link template
//! (HTML or Markdown).
//!
//! ## Transformer system
//!
//! Transformers are rules for turning fetched page data into the (url, text,
//! description) triple a template renders. The [`TransformerRegistry`] maps
//! domains to transformers with longest-suffix matching, so a rule for
//! `example.com` also covers `www.example.com`; unmatched domains fall back
//! to [`default_transformer`], which prefers a lone `h1` over the `<title>`
//! tag.
//!
//! ## Templates
//!
//! A [`LinkTemplate`] is a template string plus per-field filter chains.
//! Built-ins: `html`, `html-new-tab` and `markdown`. Custom templates can use
//! the `uri.*` sub-part placeholders, e.g.
//! `[{{{text}}} — {{{uri.hostname}}}{{#uri.hasPath}}/…{{/uri.hasPath}}]({{{url}}})`.
//!
//! ## Quick start
//!
//! ```no_run
//! use prettylink::{LinkData, LinkGenerator, PageData};
//!
//! # async fn demo() -> Result<(), prettylink::LinkError> {
//! let mut generator = LinkGenerator::new();
//! generator.register_transformer("example.com", |page: &PageData| {
//!     LinkData::with_text(page.url(), page.main_heading())
//! })?;
//!
//! let link = generator
//!     .generate_link_with("https://www.example.com/post", "markdown")
//!     .await?;
//! println!("{link}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod extract;
mod fetch;
mod page;
mod render;
mod template;
mod transform;
pub mod util;

pub use client::{GeneratedLink, LinkGenerator, LinkGeneratorBuilder};
pub use error::LinkError;
pub use extract::{extract_headings, extract_title, populate_page_data, HeadingLevel};
pub use fetch::{FetchOptions, HttpFetcher, PageFetcher};
pub use page::{template_fields, LinkData, PageData};
pub use render::{escape_html, render, Field, Fields};
pub use template::{
    Filter, LinkTemplate, TemplateRegistry, DEFAULT_TEMPLATE_NAME, HTML_NEW_TAB_TEMPLATE,
    HTML_TEMPLATE, MARKDOWN_TEMPLATE,
};
pub use transform::{default_transformer, Transformer, TransformerRegistry, DEFAULT_DOMAIN};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "PrettyLink/0.1";
