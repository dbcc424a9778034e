//! Board DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Board;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Board> for BoardResponse {
    fn from(b: Board) -> Self {
        Self {
            id: b.id,
            name: b.name,
            title: b.title,
            description: b.description,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBoardRequest {
    /// URL name, also the board's subdomain
    #[validate(length(min = 1, max = 250, message = "board name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 250, message = "board title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}
