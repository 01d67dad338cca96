//! # Clipnest API
//!
//! The remote collection backend client. [`HttpRemoteApi`] implements the
//! [`RemoteApi`](clipnest_protocols::RemoteApi) contract against
//! `{base_url}/api/v3`; [`HttpProxyExecutor`] executes raw relayed requests
//! for the router's `ProxyApiRequest` handler.

mod client;
mod proxy;

pub use client::HttpRemoteApi;
pub use proxy::HttpProxyExecutor;
