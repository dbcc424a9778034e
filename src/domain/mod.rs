//! Domain layer: entities, invariants and repository interfaces

pub mod board;
pub mod filterset;
pub mod job_post;
pub mod repositories;
pub mod taxonomy;

pub use board::Board;
pub use filterset::{FilterCriteria, Filterset};
pub use job_post::JobPost;
pub use repositories::{DomainResult, RepositoryProvider};
pub use taxonomy::{TaxonomyItem, TaxonomyKind};

pub use crate::shared::errors::DomainError;
