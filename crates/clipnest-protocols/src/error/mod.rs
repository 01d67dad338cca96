//! Error types for the clipnest runtime.
//!
//! Each domain has its own error enum. Remote failures are displayable and
//! non-fatal at the session boundary; the only fatal condition is
//! [`SessionError::AuthRequired`], which exits to the external sign-in page.

mod api;
mod extract;
mod router;
mod session;
mod store;

pub use api::ApiError;
pub use extract::ExtractError;
pub use router::RouterError;
pub use session::SessionError;
pub use store::StoreError;
