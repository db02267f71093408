//! Link generation orchestration
//!
//! [`LinkGenerator`] is the context object tying the pipeline together: it
//! owns the transformer and template registries and the page fetcher, and
//! drives fetch → transform → render for each request. Registries are
//! populated at setup time; generation takes `&self`, so independent calls
//! may run concurrently.

use serde::Serialize;

use crate::error::LinkError;
use crate::fetch::{FetchOptions, HttpFetcher, PageFetcher};
use crate::page::{template_fields, LinkData, PageData};
use crate::render::render;
use crate::template::{LinkTemplate, TemplateRegistry, DEFAULT_TEMPLATE_NAME};
use crate::transform::TransformerRegistry;

/// A generated link: the resolved link data plus the rendered output
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLink {
    /// The (url, text, description) triple the template was rendered from
    #[serde(flatten)]
    pub link: LinkData,
    /// The rendered template output
    pub rendered: String,
}

/// Builder for configuring a [`LinkGenerator`]
#[derive(Default)]
pub struct LinkGeneratorBuilder {
    user_agent: Option<String>,
    fetcher: Option<Box<dyn PageFetcher>>,
}

impl LinkGeneratorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom User-Agent for page fetches
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Substitute a custom page fetcher for the HTTP one
    pub fn fetcher(mut self, fetcher: impl PageFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Build the generator, with the built-in templates and the default
    /// transformer registered
    pub fn build(self) -> LinkGenerator {
        LinkGenerator {
            transformers: TransformerRegistry::new(),
            templates: TemplateRegistry::with_defaults(),
            fetcher: self.fetcher.unwrap_or_else(|| Box::new(HttpFetcher::new())),
            options: FetchOptions {
                user_agent: self.user_agent,
            },
        }
    }
}

/// The link generation pipeline: registries plus fetcher
pub struct LinkGenerator {
    transformers: TransformerRegistry,
    templates: TemplateRegistry,
    fetcher: Box<dyn PageFetcher>,
    options: FetchOptions,
}

impl Default for LinkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkGenerator {
    /// Create a generator with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a generator builder
    pub fn builder() -> LinkGeneratorBuilder {
        LinkGeneratorBuilder::new()
    }

    /// Register a transformer for a domain and its subdomains
    pub fn register_transformer<F>(&mut self, domain: &str, transformer: F) -> Result<(), LinkError>
    where
        F: Fn(&PageData) -> LinkData + Send + Sync + 'static,
    {
        self.transformers.register(domain, transformer)
    }

    /// Register a template under a name, overwriting any previous entry
    pub fn register_template(
        &mut self,
        name: &str,
        template: LinkTemplate,
    ) -> Result<(), LinkError> {
        self.templates.register(name, template)
    }

    /// Fetch the page data for a URL
    pub async fn fetch_page_data(&self, url: &str) -> Result<PageData, LinkError> {
        if url.is_empty() {
            return Err(LinkError::MissingUrl);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LinkError::InvalidUrlScheme);
        }
        self.fetcher.fetch_page_data(url, &self.options).await
    }

    /// Fetch a page and transform it into link data using the most specific
    /// transformer registered for its host
    pub async fn generate_link_data(&self, url: &str) -> Result<LinkData, LinkError> {
        let page = self.fetch_page_data(url).await?;
        let transformer = self.transformers.resolve(page.hostname());
        tracing::debug!(host = page.hostname(), "transforming page data");
        Ok(transformer(&page))
    }

    /// Generate a link and return both the link data and the rendered output.
    ///
    /// An unknown template name is fatal for the call: no fallback template
    /// is substituted and nothing is rendered.
    pub async fn generate(
        &self,
        url: &str,
        template_name: &str,
    ) -> Result<GeneratedLink, LinkError> {
        let link = self.generate_link_data(url).await?;
        let template = self.templates.resolve(template_name)?;

        // Filters are applied per field before substitution; the uri.*
        // sub-parts derive from the filtered URL value.
        let url = template.apply("url", link.url());
        let text = template.apply("text", link.text());
        let description = template.apply("description", link.description());

        let fields = template_fields(&url, &text, &description);
        let rendered = render(template.template(), &fields);
        Ok(GeneratedLink { link, rendered })
    }

    /// Generate a link for a URL using the default `html` template
    pub async fn generate_link(&self, url: &str) -> Result<String, LinkError> {
        self.generate_link_with(url, DEFAULT_TEMPLATE_NAME).await
    }

    /// Generate a link for a URL using a named template
    pub async fn generate_link_with(
        &self,
        url: &str,
        template_name: &str,
    ) -> Result<String, LinkError> {
        Ok(self.generate(url, template_name).await?.rendered)
    }
}
