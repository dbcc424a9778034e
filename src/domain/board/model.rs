//! Board domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;
use crate::shared::validations::is_valid_slug;

/// Job board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: i32,
    /// URL name, also used as the board's subdomain
    pub name: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            title: title.into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether this is the board served on the bare domain
    pub fn is_root(&self, root_name: &str) -> bool {
        self.name == root_name
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_valid_slug(&self.name) {
            return Err(DomainError::Validation(format!(
                "Invalid board name '{}'",
                self.name
            )));
        }
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Board title is required".into()));
        }
        Ok(())
    }
}
