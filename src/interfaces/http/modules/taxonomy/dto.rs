//! Taxonomy DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::TaxonomyItem;

/// Job type, category, tag or domain
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaxonomyItemResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<TaxonomyItem> for TaxonomyItemResponse {
    fn from(item: TaxonomyItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            title: item.title,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaxonomyItemRequest {
    /// Display title; the name is derived from it (domains use the
    /// lowercased hostname)
    #[validate(length(min = 1, max = 250, message = "title is required"))]
    pub title: String,
}
