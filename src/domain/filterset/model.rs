//! Filterset domain entity
//!
//! A filter set stores a named combination of job filters for one board so
//! that the filtered listing can be served at a readable URL such as
//! `/f/machine-learning-jobs-in-bangalore`.

use chrono::{DateTime, Utc};

use super::criteria::{sorted_ids, sorted_names, FilterCriteria};
use crate::domain::board::Board;
use crate::shared::errors::DomainError;
use crate::shared::validations::{is_valid_slug, normalize_currency, slugify, MAX_NAME_LENGTH};

/// Maximum length of the keyword string
pub const MAX_KEYWORDS_LENGTH: usize = 250;

#[derive(Debug, Clone, PartialEq)]
pub struct Filterset {
    pub id: i32,
    pub board_id: i32,
    /// URL name, unique within the board
    pub name: String,
    pub title: String,
    /// Welcome text
    pub description: String,
    /// Associated job type names
    pub types: Vec<String>,
    /// Associated job category names
    pub categories: Vec<String>,
    /// Associated tag names
    pub tags: Vec<String>,
    /// Associated employer domain names
    pub domains: Vec<String>,
    /// Location geoname IDs, kept sorted
    pub geonameids: Vec<i64>,
    pub remote_location: bool,
    pub pay_currency: Option<String>,
    pub pay_cash: Option<i64>,
    pub equity: bool,
    pub keywords: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Filterset {
    /// New filter set with no criteria. An empty name is derived from the title.
    pub fn new(board_id: i32, name: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        let mut name = name.into();
        if name.trim().is_empty() {
            name = slugify(&title);
        }
        let now = Utc::now();
        Self {
            id: 0,
            board_id,
            name,
            title,
            description: String::new(),
            types: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            domains: Vec::new(),
            geonameids: Vec::new(),
            remote_location: false,
            pay_currency: None,
            pay_cash: None,
            equity: false,
            keywords: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Derive the canonical filter dictionary for this filter set.
    pub fn to_filters(&self) -> FilterCriteria {
        FilterCriteria {
            types: sorted_names(&self.types),
            categories: sorted_names(&self.categories),
            tags: sorted_names(&self.tags),
            domains: sorted_names(&self.domains),
            geonameids: self.geonameids.clone(),
            currency: self.pay_currency.clone(),
            pay: self.pay_cash,
            equity: self.equity,
            anywhere: self.remote_location,
            keywords: self.keywords.clone(),
        }
    }

    /// Replace every criterion with the given filters.
    pub fn apply_filters(&mut self, filters: &FilterCriteria) {
        self.types = filters.types.clone();
        self.categories = filters.categories.clone();
        self.tags = filters.tags.clone();
        self.domains = filters.domains.clone();
        self.geonameids = filters.geonameids.clone();
        self.pay_currency = filters.currency.clone();
        self.pay_cash = filters.pay;
        self.equity = filters.equity;
        self.remote_location = filters.anywhere;
        self.keywords = filters.keywords.clone();
    }

    /// Bring stored fields into canonical form. Runs before every write.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.title = self.title.trim().to_string();
        self.types = sorted_names(&self.types);
        self.categories = sorted_names(&self.categories);
        self.tags = sorted_names(&self.tags);
        self.domains = sorted_names(&self.domains);
        self.geonameids = sorted_ids(&self.geonameids);
        self.keywords = self.keywords.trim().to_string();
        self.pay_currency = self
            .pay_currency
            .as_deref()
            .map(|c| normalize_currency(c).unwrap_or_else(|| c.to_string()));
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".into()));
        }
        if !is_valid_slug(&self.name) {
            return Err(DomainError::Validation(format!(
                "Invalid name '{}': use lowercase letters, digits and dashes (max {} chars)",
                self.name, MAX_NAME_LENGTH
            )));
        }
        if self.keywords.chars().count() > MAX_KEYWORDS_LENGTH {
            return Err(DomainError::Validation(format!(
                "Keywords must be at most {} characters",
                MAX_KEYWORDS_LENGTH
            )));
        }
        match (&self.pay_currency, self.pay_cash) {
            (None, None) => {}
            (Some(currency), Some(cash)) => {
                if normalize_currency(currency).as_deref() != Some(currency.as_str()) {
                    return Err(DomainError::Validation(format!(
                        "Invalid currency '{}'",
                        currency
                    )));
                }
                if cash <= 0 {
                    return Err(DomainError::Validation(
                        "Pay must be a positive amount".into(),
                    ));
                }
            }
            _ => {
                return Err(DomainError::Validation(
                    "Pay and currency must be specified together".into(),
                ));
            }
        }
        if self.geonameids.iter().any(|id| *id <= 0) {
            return Err(DomainError::Validation("Geoname IDs must be positive".into()));
        }
        Ok(())
    }

    /// Path of the public page, relative to the board's host
    pub fn url_path(&self) -> String {
        format!("/f/{}", self.name)
    }

    /// Absolute URL of the public page. Boards other than the root board are
    /// served on their own subdomain.
    pub fn url_for(&self, board: &Board, server_name: &str, root_board: &str) -> String {
        if board.is_root(root_board) {
            format!("https://{}{}", server_name, self.url_path())
        } else {
            format!("https://{}.{}{}", board.name, server_name, self.url_path())
        }
    }
}

impl std::fmt::Display for Filterset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Filterset {} \"{}\">", self.board_id, self.title)
    }
}
