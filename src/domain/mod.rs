//! Domain types shared by the repository source, the pipeline and the commands.

pub mod error;
pub mod model;

pub use error::RepositoryError;
pub use model::{Owner, Repository, SearchResult};
