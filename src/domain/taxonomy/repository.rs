//! Taxonomy repository interface

use async_trait::async_trait;

use super::model::{TaxonomyItem, TaxonomyKind};
use crate::domain::DomainResult;

#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Insert a new item; a duplicate name is a `Conflict`
    async fn save(&self, item: TaxonomyItem) -> DomainResult<TaxonomyItem>;

    async fn find_by_name(
        &self,
        kind: TaxonomyKind,
        name: &str,
    ) -> DomainResult<Option<TaxonomyItem>>;

    async fn find_all(&self, kind: TaxonomyKind) -> DomainResult<Vec<TaxonomyItem>>;
}
