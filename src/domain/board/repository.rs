//! Board repository interface

use async_trait::async_trait;

use super::model::Board;
use crate::domain::DomainResult;

#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Insert a new board, returning it with its assigned id
    async fn save(&self, board: Board) -> DomainResult<Board>;

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Board>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Board>>;

    async fn find_all(&self) -> DomainResult<Vec<Board>>;
}
