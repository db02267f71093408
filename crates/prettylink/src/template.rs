//! Link templates and the template registry
//!
//! A [`LinkTemplate`] couples a template string with per-field filter chains.
//! Filters registered under `all` run against every field, before that
//! field's own chain; within a chain, filters run in registration order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::LinkError;

/// A string-to-string transformation applied to one template field
pub type Filter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The template name [`crate::LinkGenerator::generate_link`] renders with
pub const DEFAULT_TEMPLATE_NAME: &str = "html";

/// Built-in HTML anchor template
pub const HTML_TEMPLATE: &str = r#"<a href="{{{url}}}" title="{{description}}">{{text}}</a>"#;

/// Built-in HTML anchor template that opens in a new tab
pub const HTML_NEW_TAB_TEMPLATE: &str =
    r#"<a href="{{{url}}}" title="{{description}}" target="_blank" rel="noopener">{{text}}</a>"#;

/// Built-in Markdown link template
pub const MARKDOWN_TEMPLATE: &str = "[{{{text}}}]({{{url}}})";

/// A template string plus ordered, field-scoped filter chains
#[derive(Clone, Default)]
pub struct LinkTemplate {
    template: String,
    all: Vec<Filter>,
    url: Vec<Filter>,
    text: Vec<Filter>,
    description: Vec<Filter>,
}

impl LinkTemplate {
    /// Create a template from its template string
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    /// The raw template string
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Append a filter to one of the chains `all`, `url`, `text` or
    /// `description`.
    ///
    /// An unknown field name is ignored with a warning rather than failing:
    /// a malformed filter registration must not abort an application that is
    /// mid-setup, and must not disturb the filters already in place.
    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let chain = match field {
            "all" => &mut self.all,
            "url" => &mut self.url,
            "text" => &mut self.text,
            "description" => &mut self.description,
            _ => {
                tracing::warn!(field, "ignoring filter for unknown template field");
                return;
            }
        };
        chain.push(Arc::new(filter));
    }

    /// The filters that apply to a field, in application order.
    ///
    /// For `all` this is the `all` chain alone; for any other valid field it
    /// is the `all` chain followed by the field's own chain; for an unknown
    /// field it is empty.
    pub fn filters_for(&self, field: &str) -> Vec<&Filter> {
        let own = match field {
            "all" => return self.all.iter().collect(),
            "url" => &self.url,
            "text" => &self.text,
            "description" => &self.description,
            _ => return Vec::new(),
        };
        self.all.iter().chain(own.iter()).collect()
    }

    /// Left-fold a field's filter chain over a value
    pub fn apply(&self, field: &str, value: &str) -> String {
        self.filters_for(field)
            .into_iter()
            .fold(value.to_string(), |acc, filter| filter(&acc))
    }
}

impl fmt::Debug for LinkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkTemplate")
            .field("template", &self.template)
            .field("all_filters", &self.all.len())
            .field("url_filters", &self.url.len())
            .field("text_filters", &self.text.len())
            .field("description_filters", &self.description.len())
            .finish()
    }
}

/// Name-to-template mapping with exact lookup.
///
/// Unlike the transformer registry there is no fallback: rendering with the
/// wrong template would produce a misleading link, so an unknown name is an
/// error the caller sees.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, LinkTemplate>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in templates pre-registered:
    /// `html`, `html-new-tab` and `markdown`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, template) in [
            (DEFAULT_TEMPLATE_NAME, HTML_TEMPLATE),
            ("html-new-tab", HTML_NEW_TAB_TEMPLATE),
            ("markdown", MARKDOWN_TEMPLATE),
        ] {
            registry
                .register(name, LinkTemplate::new(template))
                .expect("built-in template names are valid");
        }
        registry
    }

    /// Register a template under a name, silently overwriting any previous
    /// entry for that exact name
    pub fn register(&mut self, name: &str, template: LinkTemplate) -> Result<(), LinkError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LinkError::InvalidTemplateName);
        }
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    /// Look up a template by exact name
    pub fn resolve(&self, name: &str) -> Result<&LinkTemplate, LinkError> {
        self.templates
            .get(name)
            .ok_or_else(|| LinkError::UnknownTemplate(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::template_fields;
    use crate::render::render;

    #[test]
    fn test_filters_apply_in_registration_order() {
        let mut template = LinkTemplate::new("{{text}}");
        template.add_filter("text", |s| format!("{s}a"));
        template.add_filter("text", |s| format!("{s}b"));

        assert_eq!(template.apply("text", "x"), "xab");
    }

    #[test]
    fn test_all_filters_run_before_field_filters() {
        let mut template = LinkTemplate::new("{{text}}");
        template.add_filter("text", |s| format!("{s}+field"));
        template.add_filter("all", |s| format!("{s}+all"));

        assert_eq!(template.apply("text", "x"), "x+all+field");
        assert_eq!(template.apply("url", "x"), "x+all");
    }

    #[test]
    fn test_filters_for_all_excludes_field_chains() {
        let mut template = LinkTemplate::new("");
        template.add_filter("all", |s| s.to_string());
        template.add_filter("url", |s| s.to_string());

        assert_eq!(template.filters_for("all").len(), 1);
        assert_eq!(template.filters_for("url").len(), 2);
        assert_eq!(template.filters_for("text").len(), 1);
    }

    #[test]
    fn test_unknown_field_is_a_soft_no_op() {
        let mut template = LinkTemplate::new("{{text}}");
        template.add_filter("text", |s| s.to_uppercase());
        template.add_filter("tilte", |_| String::from("clobbered"));

        assert!(template.filters_for("tilte").is_empty());
        // the existing chain is untouched
        assert_eq!(template.apply("text", "hi"), "HI");
    }

    #[test]
    fn test_markdown_template_renders_exactly() {
        let fields = template_fields("https://e.com/a", "Example", "Example");
        assert_eq!(
            render(MARKDOWN_TEMPLATE, &fields),
            "[Example](https://e.com/a)"
        );
    }

    #[test]
    fn test_markdown_template_does_not_escape() {
        let fields = template_fields("https://e.com/?a=1&b=2", "Q&A", "Q&A");
        assert_eq!(
            render(MARKDOWN_TEMPLATE, &fields),
            "[Q&A](https://e.com/?a=1&b=2)"
        );
    }

    #[test]
    fn test_html_template_escapes_description_but_not_url() {
        let fields = template_fields(
            "https://e.com/?q=a%26b",
            "Title",
            "Ben & Jerry's \"best\"",
        );
        let rendered = render(HTML_TEMPLATE, &fields);
        assert_eq!(
            rendered,
            "<a href=\"https://e.com/?q=a%26b\" \
             title=\"Ben &amp; Jerry&#39;s &quot;best&quot;\">Title</a>"
        );
    }

    #[test]
    fn test_html_new_tab_template_adds_target_and_rel() {
        let fields = template_fields("https://e.com/", "T", "T");
        let rendered = render(HTML_NEW_TAB_TEMPLATE, &fields);
        assert!(rendered.contains("target=\"_blank\""));
        assert!(rendered.contains("rel=\"noopener\""));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = TemplateRegistry::with_defaults();
        assert!(registry.resolve("html").is_ok());
        assert!(registry.resolve("html-new-tab").is_ok());
        assert!(registry.resolve("markdown").is_ok());
    }

    #[test]
    fn test_registry_unknown_name_is_an_error() {
        let registry = TemplateRegistry::with_defaults();
        assert!(matches!(
            registry.resolve("doesNotExist"),
            Err(LinkError::UnknownTemplate(name)) if name == "doesNotExist"
        ));
    }

    #[test]
    fn test_registry_overwrites_silently() {
        let mut registry = TemplateRegistry::with_defaults();
        registry
            .register("markdown", LinkTemplate::new("{{{url}}}"))
            .unwrap();
        assert_eq!(registry.resolve("markdown").unwrap().template(), "{{{url}}}");
    }

    #[test]
    fn test_registry_empty_name_fails_fast() {
        let mut registry = TemplateRegistry::new();
        assert!(matches!(
            registry.register("", LinkTemplate::new("x")),
            Err(LinkError::InvalidTemplateName)
        ));
    }
}
