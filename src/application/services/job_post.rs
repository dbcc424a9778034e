//! Job post creation and lookup

use std::sync::Arc;

use tracing::info;

use super::taxonomy::TaxonomyService;
use crate::domain::filterset::FilterCriteria;
use crate::domain::job_post::JobPost;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct JobPostService {
    repos: Arc<dyn RepositoryProvider>,
    taxonomy: TaxonomyService,
}

impl JobPostService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            taxonomy: TaxonomyService::new(repos.clone()),
            repos,
        }
    }

    /// Post a job on the named board. Tags are created from their titles.
    pub async fn create(&self, board_name: &str, mut job: JobPost) -> DomainResult<JobPost> {
        let board = self
            .repos
            .boards()
            .find_by_name(board_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", "name", board_name))?;

        job.board_id = board.id;
        job.tags = self.taxonomy.ensure_tags(&job.tags).await?;
        let job = self.repos.job_posts().save(job).await?;
        info!(hashid = %job.hashid, board = %board.name, "Job posted");
        Ok(job)
    }

    pub async fn get(&self, hashid: &str) -> DomainResult<JobPost> {
        self.repos
            .job_posts()
            .find_by_hashid(hashid)
            .await?
            .ok_or_else(|| DomainError::not_found("JobPost", "hashid", hashid))
    }

    /// A job post as seen from one board; posts of other boards are not found.
    pub async fn get_on_board(&self, board_name: &str, hashid: &str) -> DomainResult<JobPost> {
        let board = self
            .repos
            .boards()
            .find_by_name(board_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", "name", board_name))?;
        match self.repos.job_posts().find_by_hashid(hashid).await? {
            Some(job) if job.board_id == board.id => Ok(job),
            _ => Err(DomainError::not_found("JobPost", "hashid", hashid)),
        }
    }

    pub async fn list(
        &self,
        board_name: &str,
        filters: &FilterCriteria,
        limit: u64,
    ) -> DomainResult<Vec<JobPost>> {
        let board = self
            .repos
            .boards()
            .find_by_name(board_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", "name", board_name))?;
        self.repos
            .job_posts()
            .find_for_board(board.id, filters, limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::seeded_repos;

    #[tokio::test]
    async fn create_attaches_board_and_tags() {
        let service = JobPostService::new(seeded_repos().await);
        let mut job = JobPost::new(0, "Rust engineer", "full-time", "programming");
        job.tags = vec!["Async Rust".into()];

        let saved = service.create("rust", job).await.unwrap();
        assert_eq!(saved.tags, vec!["async-rust"]);

        let fetched = service.get(&saved.hashid).await.unwrap();
        assert_eq!(fetched.id, saved.id);

        let listed = service
            .list("rust", &FilterCriteria::default(), 10)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert!(service
            .list("www", &FilterCriteria::default(), 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn unknown_board_and_hashid_are_not_found() {
        let service = JobPostService::new(seeded_repos().await);
        let job = JobPost::new(0, "Rust engineer", "full-time", "programming");
        assert!(matches!(
            service.create("nope", job).await,
            Err(DomainError::NotFound { entity: "Board", .. })
        ));
        assert!(matches!(
            service.get("zzzzzz").await,
            Err(DomainError::NotFound { entity: "JobPost", .. })
        ));
    }

    #[tokio::test]
    async fn posts_are_only_visible_on_their_board() {
        let service = JobPostService::new(seeded_repos().await);
        let job = JobPost::new(0, "Rust engineer", "full-time", "programming");
        let saved = service.create("rust", job).await.unwrap();

        let seen = service.get_on_board("rust", &saved.hashid).await.unwrap();
        assert_eq!(seen.id, saved.id);
        assert!(matches!(
            service.get_on_board("www", &saved.hashid).await,
            Err(DomainError::NotFound { entity: "JobPost", .. })
        ));
        assert!(matches!(
            service.get_on_board("nope", &saved.hashid).await,
            Err(DomainError::NotFound { entity: "Board", .. })
        ));
    }
}
