//! Terminal presentation of repository listings, searches and details.

pub mod browse;
mod list;
pub mod render;
mod search;
pub mod services;

pub use browse::browse;
pub use list::list;
pub use search::search;
