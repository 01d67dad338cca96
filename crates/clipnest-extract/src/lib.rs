//! # Clipnest Extract
//!
//! Pure page-metadata extraction. The page context observes its live DOM into
//! a [`PageDocument`] (meta tags, link tags, images with rendered geometry);
//! [`extract`] turns that into a normalized
//! [`PageSnapshot`](clipnest_protocols::PageSnapshot) with all URLs resolved
//! against the page origin.
//!
//! No I/O happens here: extraction is synchronous and side-effect free.

mod document;
mod extract;
mod resolve;

pub use document::{ImageElement, LinkTag, MetaTag, PageDocument};
pub use extract::extract;
pub use resolve::resolve_url;

use clipnest_protocols::ExtractError;

/// Observes the live page into a [`PageDocument`].
///
/// Implemented by whatever hosts the page context; observation happens fresh
/// on every call, at toggle time, never cached.
pub trait DocumentSource: Send + Sync {
    fn observe(&self) -> Result<PageDocument, ExtractError>;
}
