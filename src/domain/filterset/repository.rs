//! Filterset repository interface

use async_trait::async_trait;

use super::criteria::FilterCriteria;
use super::model::Filterset;
use crate::domain::DomainResult;

#[async_trait]
pub trait FiltersetRepository: Send + Sync {
    /// Insert a new filter set.
    ///
    /// Tag entries may be titles; missing tags are created in the same
    /// transaction. Normalises the record and rejects it with `Conflict` when
    /// another filter set of the same board has the same name or the same
    /// criteria.
    async fn save(&self, filterset: Filterset) -> DomainResult<Filterset>;

    /// Update an existing filter set, re-checking both uniqueness rules.
    async fn update(&self, filterset: Filterset) -> DomainResult<Filterset>;

    async fn find_by_name(&self, board_id: i32, name: &str) -> DomainResult<Option<Filterset>>;

    /// Find the filter set of a board whose criteria exactly equal `filters`.
    ///
    /// Fails with `IntegrityViolation` if more than one row matches.
    async fn find_by_filters(
        &self,
        board_id: i32,
        filters: &FilterCriteria,
    ) -> DomainResult<Option<Filterset>>;

    async fn find_all_for_board(&self, board_id: i32) -> DomainResult<Vec<Filterset>>;

    /// Delete a filter set together with its associations
    async fn delete(&self, board_id: i32, name: &str) -> DomainResult<()>;
}
