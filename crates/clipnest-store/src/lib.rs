//! # Clipnest Store
//!
//! Local persistence for the runtime: the durable "current user" slot and
//! in-memory implementations of the browser-adjacent seams for tests.

mod file;
mod memory;

pub use file::FileUserStore;
pub use memory::{MemoryCookieJar, MemoryUserStore, RecordingSignIn};
