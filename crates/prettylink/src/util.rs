//! URL cleanup helpers for use inside custom transformers

use url::Url;

/// Remove all `utm_*` tracking parameters from a URL's query string, keeping
/// the other parameters in order. An unparseable URL is returned unchanged.
pub fn strip_utm_parameters(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !key.starts_with("utm_"))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    parsed.to_string()
}

/// Remove the entire query string from a URL, leaving any fragment in place.
/// An unparseable URL is returned unchanged.
pub fn strip_query_string(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    parsed.set_query(None);
    parsed.to_string()
}
