//! Job post repository interface

use async_trait::async_trait;

use super::model::JobPost;
use crate::domain::filterset::FilterCriteria;
use crate::domain::DomainResult;

#[async_trait]
pub trait JobPostRepository: Send + Sync {
    /// Insert a job post. The referenced type, category, domain and tags
    /// must already exist.
    async fn save(&self, job: JobPost) -> DomainResult<JobPost>;

    async fn find_by_hashid(&self, hashid: &str) -> DomainResult<Option<JobPost>>;

    /// Jobs of a board matching any of the listed values of each criterion,
    /// newest first.
    async fn find_for_board(
        &self,
        board_id: i32,
        filters: &FilterCriteria,
        limit: u64,
    ) -> DomainResult<Vec<JobPost>>;
}
