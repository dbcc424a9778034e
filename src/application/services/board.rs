//! Board management

use std::sync::Arc;

use tracing::info;

use crate::domain::board::Board;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct BoardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BoardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Board>> {
        self.repos.boards().find_all().await
    }

    pub async fn get(&self, name: &str) -> DomainResult<Board> {
        self.repos
            .boards()
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", "name", name))
    }

    pub async fn create(&self, name: &str, title: &str, description: &str) -> DomainResult<Board> {
        let mut board = Board::new(name.trim(), title.trim());
        board.description = description.to_string();
        let board = self.repos.boards().save(board).await?;
        info!(board = %board.name, "Board created");
        Ok(board)
    }

    /// Create the root board if it does not exist yet
    pub async fn ensure_root(&self, root_name: &str) -> DomainResult<Board> {
        if let Some(board) = self.repos.boards().find_by_name(root_name).await? {
            return Ok(board);
        }
        info!(board = %root_name, "Seeding root board");
        self.repos
            .boards()
            .save(Board::new(root_name, "Job board"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::testing::test_repos;

    #[tokio::test]
    async fn ensure_root_is_idempotent() {
        let service = BoardService::new(Arc::new(test_repos().await));
        let first = service.ensure_root("www").await.unwrap();
        let second = service.ensure_root("www").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_board_is_not_found() {
        let service = BoardService::new(Arc::new(test_repos().await));
        let err = service.get("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Board", .. }));
    }
}
