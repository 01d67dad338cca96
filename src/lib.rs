//! # Clipnest
//!
//! Runtime wiring for the clipnest page-capture system.
//!
//! Clipnest saves the page a user is viewing into their remote collection.
//! Three isolated execution contexts cooperate to do it: a long-lived
//! background context (router, cookie and network access), a page-scoped
//! context (DOM observation, save session) and a transient panel UI. They
//! share no memory; everything crosses between them as typed messages.
//!
//! This crate assembles the pieces: [`config::RuntimeConfig`] describes the
//! deployment, [`runtime::Runtime`] builds the background context and hands
//! out per-page connections, and [`panel::Panel`] drives the save UI life
//! cycle inside a page context.

pub mod config;
pub mod panel;
pub mod runtime;

pub use config::RuntimeConfig;
pub use panel::Panel;
pub use runtime::{PageConnection, Runtime};

// The commonly-used pieces of the member crates, re-exported for hosts.
pub use clipnest_extract::{DocumentSource, PageDocument, extract, resolve_url};
pub use clipnest_protocols::{
    ContextMessage, LifecycleState, PageSnapshot, SessionError, UserProfile,
};
pub use clipnest_router::{PageContext, Router};
pub use clipnest_session::{DELETED_DISPLAY_WINDOW, SaveSession, SessionGate};
