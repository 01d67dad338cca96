//! # Clipnest Router
//!
//! Cross-context coordination for the clipnest runtime.
//!
//! Execution contexts (background, per-page content script, panel) run their
//! own event loops and share no memory. This crate provides:
//!
//! - [`ContextBus`] - a duplex message endpoint with request/response
//!   correlation, one per context pair
//! - [`MessageHandler`] / [`HandlerRegistry`] - the kind -> handler dispatch
//!   a context uses to answer its peer
//! - [`Router`] - the background-side coordinator: reacts to user triggers,
//!   guarantees the extractor is present in the target page, and hosts the
//!   relay handlers for cookie and network access
//! - [`RelayRemoteApi`] - the page-side remote API client that routes every
//!   call through the `ProxyApiRequest` relay
//!
//! Every request registers its responder *before* it is sent, so a reply can
//! never race the wait and be silently dropped.

mod bus;
mod frame;
mod handlers;
mod registry;
mod relay;
mod router;

pub use bus::ContextBus;
pub use frame::Frame;
pub use handlers::{AuthUpdatedHandler, CredentialHandler, ProxyHandler};
pub use registry::{HandlerRegistry, MessageHandler};
pub use relay::RelayRemoteApi;
pub use router::{PageContext, Router};
