//! Public listings: the board index and filter set pages

use std::sync::Arc;

use super::taxonomy::TaxonomyService;
use crate::domain::board::Board;
use crate::domain::filterset::{FilterCriteria, Filterset};
use crate::domain::job_post::JobPost;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Jobs shown on one listing page
pub const DEFAULT_LISTING_LIMIT: u64 = 50;

#[derive(Debug, Clone)]
pub struct BoardListing {
    pub board: Board,
    pub filters: FilterCriteria,
    pub jobs: Vec<JobPost>,
}

#[derive(Debug, Clone)]
pub struct FiltersetPage {
    pub board: Board,
    pub filterset: Filterset,
    pub jobs: Vec<JobPost>,
}

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
    limit: u64,
}

impl ListingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            limit: DEFAULT_LISTING_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    async fn board(&self, board_name: &str) -> DomainResult<Board> {
        self.repos
            .boards()
            .find_by_name(board_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", "name", board_name))
    }

    /// Jobs of a board matching the given filters, newest first
    pub async fn index(&self, board_name: &str, filters: &FilterCriteria) -> DomainResult<BoardListing> {
        let board = self.board(board_name).await?;
        let mut filters = filters.normalized();
        filters.tags = TaxonomyService::tag_names(&filters.tags);
        let jobs = self
            .repos
            .job_posts()
            .find_for_board(board.id, &filters, self.limit)
            .await?;
        Ok(BoardListing {
            board,
            filters,
            jobs,
        })
    }

    /// A filter set together with the jobs its criteria select
    pub async fn filterset_page(&self, board_name: &str, name: &str) -> DomainResult<FiltersetPage> {
        let board = self.board(board_name).await?;
        let filterset = self
            .repos
            .filtersets()
            .find_by_name(board.id, name)
            .await?
            .ok_or_else(|| DomainError::not_found("Filterset", "name", name))?;
        let jobs = self
            .repos
            .job_posts()
            .find_for_board(board.id, &filterset.to_filters(), self.limit)
            .await?;
        Ok(FiltersetPage {
            board,
            filterset,
            jobs,
        })
    }
}
