//! Relative URL resolution against the page origin.

use url::Url;

/// Resolve a possibly-relative URL against the page it was found on.
///
/// Rules, in order: empty stays empty; absolute http(s) passes through
/// unchanged; `//host/path` inherits the page's protocol; `/path` joins the
/// page origin; anything else joins `origin + "/" + path`.
///
/// If the page URL itself cannot be parsed the raw value is returned as-is;
/// extraction has already validated the location by the time this runs.
pub fn resolve_url(page_url: &str, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    let Ok(page) = Url::parse(page_url) else {
        return raw.to_string();
    };
    let origin = page.origin().ascii_serialization();

    if let Some(rest) = raw.strip_prefix("//") {
        return format!("{}://{}", page.scheme(), rest);
    }

    if raw.starts_with('/') {
        return format!("{origin}{raw}");
    }

    format!("{origin}/{raw}")
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
