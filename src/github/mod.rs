//! GitHub REST endpoints: repository search and organization listing.

pub mod api;
mod client;

pub use client::{DEFAULT_API_URL, GitHubClient};
