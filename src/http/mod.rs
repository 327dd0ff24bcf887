//! HTTP transport: a minimal GET seam plus typed failure layers.

mod client;
mod error;

#[cfg(test)]
pub use client::MockHttpGet;
pub use client::{HttpClient, HttpGet, HttpResponse};
pub use error::{FetchError, TransportError};
