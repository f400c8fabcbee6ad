//! Utility modules shared across sources and the download worker.
//!
//! - [`HttpClient`]: shared HTTP client with browser User-Agent and fixed timeouts
//! - [`sanitize_filename`]: turn an arbitrary title into a safe filename

mod http;
mod sanitize;

pub use http::{HttpClient, BROWSER_USER_AGENT};
pub use sanitize::sanitize_filename;
