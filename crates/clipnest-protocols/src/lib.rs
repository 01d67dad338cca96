//! # Clipnest Protocols
//!
//! Shared protocol definitions for the clipnest page-capture runtime.
//! Contains only types, errors and interface traits - no I/O implementations.
//!
//! ## Core Pieces
//!
//! - [`ContextMessage`] - the closed set of messages exchanged between
//!   execution contexts
//! - [`PageSnapshot`] / [`SavedItem`] / [`LifecycleState`] - the save data model
//! - [`RemoteApi`] - contract of the remote collection backend
//! - [`UserStore`] / [`CookieJar`] / [`SignInRedirect`] - local user seams

pub mod error;
pub mod message;
pub mod remote;
pub mod snapshot;
pub mod store;
pub mod user;

// Re-export core types
pub use error::{ApiError, ExtractError, RouterError, SessionError, StoreError};
pub use message::{AuthAck, ContextMessage, CredentialResponse};
pub use remote::{CreateItem, ProxyExecutor, ProxyOutcome, ProxyRequest, RemoteApi};
pub use snapshot::{LifecycleState, PageSnapshot, SavedItem};
pub use store::{CookieJar, SignInRedirect, UserStore};
pub use user::{UserCredential, UserProfile};
