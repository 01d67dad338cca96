//! Snapshot extraction.

use clipnest_protocols::{ExtractError, PageSnapshot};
use tracing::debug;

use crate::document::{ImageElement, PageDocument};
use crate::resolve::resolve_url;

/// Minimum rendered edge for a hero image candidate, in CSS pixels.
const HERO_MIN_EDGE: f64 = 200.0;
/// Maximum |width - height| for a hero image candidate.
const HERO_ASPECT_TOLERANCE: f64 = 100.0;

/// Extract a normalized [`PageSnapshot`] from an observed page document.
///
/// Preference order: explicit Open Graph metadata wins over heuristics, and
/// the first qualifying `<img>` in document order wins among heuristics. All
/// relative URLs in the result are resolved against the page origin.
pub fn extract(document: &PageDocument) -> Result<PageSnapshot, ExtractError> {
    if !document.location.starts_with("http") {
        return Err(ExtractError::InvalidProtocol(document.location.clone()));
    }

    let description = document
        .meta_named("description")
        .or_else(|| document.meta_property("og:description"))
        .unwrap_or_default()
        .to_string();

    let image = match document.meta_property("og:image") {
        Some(content) => content.to_string(),
        None => document
            .images
            .iter()
            .find(|&img| is_hero_candidate(img))
            .map(|img| img.src.clone())
            .unwrap_or_default(),
    };

    let favicon = document
        .link_rel("icon")
        .or_else(|| document.link_rel("shortcut icon"))
        .unwrap_or_default()
        .to_string();

    // Description is prose and stays verbatim; only the URL fields resolve.
    let snapshot = PageSnapshot {
        title: document.title.clone(),
        description,
        image: resolve_url(&document.location, &image),
        favicon: resolve_url(&document.location, &favicon),
        source_url: document.location.clone(),
    };

    debug!(
        url = %snapshot.source_url,
        has_image = !snapshot.image.is_empty(),
        has_favicon = !snapshot.favicon.is_empty(),
        "extracted page snapshot"
    );

    Ok(snapshot)
}

/// A "hero" image: large enough to preview and roughly square.
fn is_hero_candidate(img: &ImageElement) -> bool {
    img.width >= HERO_MIN_EDGE
        && img.height >= HERO_MIN_EDGE
        && (img.width - img.height).abs() < HERO_ASPECT_TOLERANCE
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
