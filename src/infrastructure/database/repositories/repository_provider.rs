//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::board::BoardRepository;
use crate::domain::filterset::FiltersetRepository;
use crate::domain::job_post::JobPostRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::taxonomy::TaxonomyRepository;

use super::board_repository::SeaOrmBoardRepository;
use super::filterset_repository::SeaOrmFiltersetRepository;
use super::job_post_repository::SeaOrmJobPostRepository;
use super::taxonomy_repository::SeaOrmTaxonomyRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let board = repos.boards().find_by_name("www").await?;
/// let jobs = repos.job_posts().find_for_board(board.id, &filters, 50).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    boards: SeaOrmBoardRepository,
    taxonomy: SeaOrmTaxonomyRepository,
    job_posts: SeaOrmJobPostRepository,
    filtersets: SeaOrmFiltersetRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            boards: SeaOrmBoardRepository::new(db.clone()),
            taxonomy: SeaOrmTaxonomyRepository::new(db.clone()),
            job_posts: SeaOrmJobPostRepository::new(db.clone()),
            filtersets: SeaOrmFiltersetRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn boards(&self) -> &dyn BoardRepository {
        &self.boards
    }

    fn taxonomy(&self) -> &dyn TaxonomyRepository {
        &self.taxonomy
    }

    fn job_posts(&self) -> &dyn JobPostRepository {
        &self.job_posts
    }

    fn filtersets(&self) -> &dyn FiltersetRepository {
        &self.filtersets
    }
}
