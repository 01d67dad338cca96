//! The observed page document model.
//!
//! A content script sees rendered geometry; a plain HTML parse does not. The
//! document therefore carries each image's bounding-box size as observed in
//! the live page, and the extractor stays pure over this model.

use serde::{Deserialize, Serialize};

/// A `<meta>` tag, keyed by either `name` or `property`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetaTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub content: String,
}

/// A `<link>` tag with its `rel` attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkTag {
    pub rel: String,
    pub href: String,
}

/// An `<img>` element with its rendered bounding-box size in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageElement {
    pub src: String,
    pub width: f64,
    pub height: f64,
}

/// A point-in-time observation of the page's DOM, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageDocument {
    /// The page's current location.
    pub location: String,
    pub title: String,
    #[serde(default)]
    pub metas: Vec<MetaTag>,
    #[serde(default)]
    pub links: Vec<LinkTag>,
    #[serde(default)]
    pub images: Vec<ImageElement>,
}

impl PageDocument {
    /// Create an empty document at the given location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a `<meta name=…>` tag.
    pub fn with_meta_name(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.metas.push(MetaTag {
            name: Some(name.into()),
            property: None,
            content: content.into(),
        });
        self
    }

    /// Add a `<meta property=…>` tag (Open Graph style).
    pub fn with_meta_property(
        mut self,
        property: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.metas.push(MetaTag {
            name: None,
            property: Some(property.into()),
            content: content.into(),
        });
        self
    }

    /// Add a `<link rel=…>` tag.
    pub fn with_link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.push(LinkTag {
            rel: rel.into(),
            href: href.into(),
        });
        self
    }

    /// Add an `<img>` with its rendered size.
    pub fn with_image(mut self, src: impl Into<String>, width: f64, height: f64) -> Self {
        self.images.push(ImageElement {
            src: src.into(),
            width,
            height,
        });
        self
    }

    /// First `<meta name=…>` content for the given name.
    pub fn meta_named(&self, name: &str) -> Option<&str> {
        self.metas
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
            .map(|m| m.content.as_str())
    }

    /// First `<meta property=…>` content for the given property.
    pub fn meta_property(&self, property: &str) -> Option<&str> {
        self.metas
            .iter()
            .find(|m| m.property.as_deref() == Some(property))
            .map(|m| m.content.as_str())
    }

    /// First `<link>` href with the given `rel`.
    pub fn link_rel(&self, rel: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.href.as_str())
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
