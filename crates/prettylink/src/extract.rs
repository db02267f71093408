//! Title and heading extraction from fetched HTML

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::page::PageData;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("h1 selector is valid"));

static H2_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("h2 selector is valid"));

/// The heading levels the pipeline cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `h1` headings
    H1,
    /// `h2` headings
    H2,
}

/// Extract the text of the first `<title>` element, trimmed; empty if the
/// document has none
pub fn extract_title(html: &str) -> String {
    title_of(&Html::parse_document(html))
}

/// Extract the heading texts at a level, in document order
pub fn extract_headings(html: &str, level: HeadingLevel) -> Vec<String> {
    headings_of(&Html::parse_document(html), level)
}

/// Parse an HTML body once and populate a page's title and headings from it
pub fn populate_page_data(page: &mut PageData, html: &str) {
    let document = Html::parse_document(html);
    page.set_title(title_of(&document));
    for heading in headings_of(&document, HeadingLevel::H1) {
        page.add_top_level_heading(heading);
    }
    for heading in headings_of(&document, HeadingLevel::H2) {
        page.add_secondary_heading(heading);
    }
}

fn title_of(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(collect_text)
        .unwrap_or_default()
}

fn headings_of(document: &Html, level: HeadingLevel) -> Vec<String> {
    let selector = match level {
        HeadingLevel::H1 => &H1_SELECTOR,
        HeadingLevel::H2 => &H2_SELECTOR,
    };
    document.select(selector).map(collect_text).collect()
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title> Foo – Site </title></head>
<body>
    <h1>Foo</h1>
    <h2>First <em>section</em></h2>
    <h2>Second section</h2>
</body>
</html>"#;

    #[test]
    fn test_extract_title_trims() {
        assert_eq!(extract_title(PAGE), "Foo – Site");
    }

    #[test]
    fn test_extract_title_missing_is_empty() {
        assert_eq!(extract_title("<p>no title here</p>"), "");
    }

    #[test]
    fn test_extract_headings_in_document_order() {
        assert_eq!(extract_headings(PAGE, HeadingLevel::H1), ["Foo"]);
        assert_eq!(
            extract_headings(PAGE, HeadingLevel::H2),
            ["First section", "Second section"]
        );
    }

    #[test]
    fn test_heading_text_flattens_nested_tags() {
        assert_eq!(
            extract_headings("<h1>Big <strong>News</strong></h1>", HeadingLevel::H1),
            ["Big News"]
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(
            extract_headings("<h1>Tom &amp; Jerry</h1>", HeadingLevel::H1),
            ["Tom & Jerry"]
        );
    }

    #[test]
    fn test_populate_page_data() {
        let mut page = PageData::new("https://e.com/a").unwrap();
        populate_page_data(&mut page, PAGE);

        assert_eq!(page.title(), "Foo – Site");
        assert_eq!(page.top_level_headings(), ["Foo"]);
        assert_eq!(page.secondary_headings().len(), 2);
    }
}
