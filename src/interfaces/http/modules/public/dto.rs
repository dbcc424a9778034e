//! Public listing payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{BoardListing, FiltersetPage};
use crate::interfaces::http::modules::boards::BoardResponse;
use crate::interfaces::http::modules::filtersets::{FilterCriteriaDto, FiltersetResponse};
use crate::interfaces::http::modules::jobs::JobPostResponse;

/// Board index: the applied filters and the matching jobs
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardListingResponse {
    pub board: BoardResponse,
    pub filters: FilterCriteriaDto,
    /// Saved filter set with exactly these filters, if any
    pub filterset: Option<FiltersetResponse>,
    pub jobs: Vec<JobPostResponse>,
}

impl BoardListingResponse {
    pub fn new(listing: BoardListing, filterset: Option<FiltersetResponse>) -> Self {
        Self {
            board: listing.board.into(),
            filters: listing.filters.into(),
            filterset,
            jobs: listing.jobs.into_iter().map(Into::into).collect(),
        }
    }
}

/// A filter set page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FiltersetPageResponse {
    pub board: BoardResponse,
    pub filterset: FiltersetResponse,
    pub jobs: Vec<JobPostResponse>,
}

impl From<FiltersetPage> for FiltersetPageResponse {
    fn from(page: FiltersetPage) -> Self {
        Self {
            board: page.board.into(),
            filterset: page.filterset.into(),
            jobs: page.jobs.into_iter().map(Into::into).collect(),
        }
    }
}
