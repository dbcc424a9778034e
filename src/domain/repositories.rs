//! Repository access for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::board::BoardRepository;
use super::filterset::FiltersetRepository;
use super::job_post::JobPostRepository;
use super::taxonomy::TaxonomyRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let board = repos.boards().find_by_name("www").await?;
///     let fs = repos.filtersets().find_by_name(board.id, "rust-jobs").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn boards(&self) -> &dyn BoardRepository;
    fn taxonomy(&self) -> &dyn TaxonomyRepository;
    fn job_posts(&self) -> &dyn JobPostRepository;
    fn filtersets(&self) -> &dyn FiltersetRepository;
}
