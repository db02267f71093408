//! Template string substitution
//!
//! A deliberately small mustache-style renderer covering the three constructs
//! the link templates need: `{{name}}` substitutes a field HTML-escaped,
//! `{{{name}}}` substitutes it raw, and `{{#name}}...{{/name}}` emits its body
//! only when the named field is truthy. Unknown placeholders substitute empty.

use std::collections::BTreeMap;

/// A single template field value
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A text field, substituted into the template
    Str(String),
    /// A flag, usable as a section condition
    Bool(bool),
}

impl Field {
    /// Truthiness for section conditions: true booleans and non-empty strings
    fn is_truthy(&self) -> bool {
        match self {
            Field::Bool(flag) => *flag,
            Field::Str(text) => !text.is_empty(),
        }
    }
}

/// The fields available to a template, keyed by placeholder name
pub type Fields = BTreeMap<String, Field>;

/// Render a template string against a set of fields
pub fn render(template: &str, fields: &Fields) -> String {
    let mut out = String::with_capacity(template.len());
    render_into(template, fields, &mut out);
    out
}

fn render_into(template: &str, fields: &Fields, out: &mut String) {
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        // Raw substitution: {{{name}}}
        if let Some(body) = after.strip_prefix('{') {
            if let Some(end) = body.find("}}}") {
                push_field(fields.get(body[..end].trim()), out, false);
                rest = &body[end + 3..];
                continue;
            }
            // Unterminated tag, emit literally
            out.push_str("{{");
            rest = after;
            continue;
        }

        // Section: {{#name}}...{{/name}}
        if let Some(body) = after.strip_prefix('#') {
            if let Some(end) = body.find("}}") {
                let name = body[..end].trim();
                let section = &body[end + 2..];
                if let Some(close) = find_section_close(section, name) {
                    if fields.get(name).is_some_and(Field::is_truthy) {
                        render_into(&section[..close], fields, out);
                    }
                    rest = &section[close + close_tag_len(name)..];
                    continue;
                }
            }
            // Unclosed section, emit literally
            out.push_str("{{");
            rest = after;
            continue;
        }

        // Escaped substitution: {{name}}
        if let Some(end) = after.find("}}") {
            push_field(fields.get(after[..end].trim()), out, true);
            rest = &after[end + 2..];
        } else {
            out.push_str("{{");
            rest = after;
        }
    }

    out.push_str(rest);
}

/// Byte offset of the `{{/name}}` matching the already-consumed `{{#name}}`,
/// skipping over nested sections of the same name.
fn find_section_close(section: &str, name: &str) -> Option<usize> {
    let open = format!("{{{{#{name}}}}}");
    let close = format!("{{{{/{name}}}}}");

    let mut depth = 0usize;
    let mut idx = 0usize;
    loop {
        let rest = &section[idx..];
        let next_close = rest.find(&close)?;
        match rest.find(&open) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                idx += next_open + open.len();
            }
            _ => {
                if depth == 0 {
                    return Some(idx + next_close);
                }
                depth -= 1;
                idx += next_close + close.len();
            }
        }
    }
}

fn close_tag_len(name: &str) -> usize {
    // "{{/" + name + "}}"
    name.len() + 5
}

fn push_field(field: Option<&Field>, out: &mut String, escape: bool) {
    match field {
        Some(Field::Str(text)) => {
            if escape {
                out.push_str(&escape_html(text));
            } else {
                out.push_str(text);
            }
        }
        Some(Field::Bool(flag)) => out.push_str(if *flag { "true" } else { "false" }),
        None => {}
    }
}

/// Escape the characters that are unsafe inside HTML text and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, Field)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_escaped_substitution() {
        let f = fields(&[("text", Field::Str("Tom & \"Jerry\" <3".to_string()))]);
        assert_eq!(
            render("<a>{{text}}</a>", &f),
            "<a>Tom &amp; &quot;Jerry&quot; &lt;3</a>"
        );
    }

    #[test]
    fn test_raw_substitution() {
        let f = fields(&[("url", Field::Str("https://e.com/?a=1&b=2".to_string()))]);
        assert_eq!(render("{{{url}}}", &f), "https://e.com/?a=1&b=2");
    }

    #[test]
    fn test_unknown_placeholder_is_empty() {
        let f = Fields::new();
        assert_eq!(render("[{{text}}]({{{url}}})", &f), "[]()");
    }

    #[test]
    fn test_section_included_when_true() {
        let f = fields(&[
            ("uri.hasPath", Field::Bool(true)),
            ("uri.hostname", Field::Str("e.com".to_string())),
        ]);
        assert_eq!(
            render("{{uri.hostname}}{{#uri.hasPath}}/…{{/uri.hasPath}}", &f),
            "e.com/…"
        );
    }

    #[test]
    fn test_section_skipped_when_false() {
        let f = fields(&[("uri.hasPath", Field::Bool(false))]);
        assert_eq!(render("x{{#uri.hasPath}}/…{{/uri.hasPath}}y", &f), "xy");
    }

    #[test]
    fn test_section_skipped_when_missing() {
        let f = Fields::new();
        assert_eq!(render("x{{#nope}}body{{/nope}}y", &f), "xy");
    }

    #[test]
    fn test_section_with_placeholders_inside() {
        let f = fields(&[
            ("show", Field::Bool(true)),
            ("text", Field::Str("hi".to_string())),
        ]);
        assert_eq!(render("{{#show}}[{{text}}]{{/show}}", &f), "[hi]");
    }

    #[test]
    fn test_nested_section_same_name() {
        let f = fields(&[("a", Field::Bool(true))]);
        assert_eq!(render("{{#a}}x{{#a}}y{{/a}}z{{/a}}", &f), "xyz");
    }

    #[test]
    fn test_nonempty_string_is_truthy() {
        let f = fields(&[("t", Field::Str("x".to_string()))]);
        assert_eq!(render("{{#t}}yes{{/t}}", &f), "yes");
        let f = fields(&[("t", Field::Str(String::new()))]);
        assert_eq!(render("{{#t}}yes{{/t}}", &f), "");
    }

    #[test]
    fn test_unterminated_tag_left_alone() {
        let f = Fields::new();
        assert_eq!(render("a {{oops", &f), "a {{oops");
        assert_eq!(render("a {{#oops}} no close", &f), "a {{#oops}} no close");
    }

    #[test]
    fn test_full_md_title_template() {
        let tpl = "[{{{text}}} — {{{uri.hostname}}}{{#uri.hasPath}}/…{{/uri.hasPath}}]({{{url}}})";
        let f = fields(&[
            ("text", Field::Str("A Post".to_string())),
            ("url", Field::Str("https://blog.e.com/a".to_string())),
            ("uri.hostname", Field::Str("blog.e.com".to_string())),
            ("uri.hasPath", Field::Bool(true)),
        ]);
        assert_eq!(
            render(tpl, &f),
            "[A Post — blog.e.com/…](https://blog.e.com/a)"
        );
    }
}
