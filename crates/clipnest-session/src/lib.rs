//! # Clipnest Session
//!
//! One save session per UI open-to-close cycle: the [`SessionGate`] decides
//! whether the user may proceed, and the [`SaveSession`] controller drives
//! quick save, enrichment, user-edited updates and delete against the remote
//! collection.

mod gate;
mod session;

pub use gate::SessionGate;
pub use session::{DELETED_DISPLAY_WINDOW, SaveSession};
