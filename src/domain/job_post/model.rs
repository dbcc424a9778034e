//! Job post domain entity

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::filterset::criteria::{sorted_ids, sorted_names};
use crate::shared::errors::DomainError;
use crate::shared::validations::normalize_currency;

/// Length of the public job identifier
pub const HASHID_LENGTH: usize = 6;

/// Maximum headline length
pub const MAX_HEADLINE_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct JobPost {
    pub id: i32,
    /// Short public identifier used in job URLs
    pub hashid: String,
    pub board_id: i32,
    pub headline: String,
    pub description: String,
    /// Job type name
    pub job_type: String,
    /// Job category name
    pub job_category: String,
    /// Tag names
    pub tags: Vec<String>,
    /// Employer domain name
    pub domain: Option<String>,
    pub geonameids: Vec<i64>,
    pub remote_location: bool,
    pub pay_currency: Option<String>,
    pub pay_cash_min: Option<i64>,
    pub pay_cash_max: Option<i64>,
    pub equity: bool,
    /// Posting time, listings are ordered by it
    pub datetime: DateTime<Utc>,
}

impl JobPost {
    pub fn new(
        board_id: i32,
        headline: impl Into<String>,
        job_type: impl Into<String>,
        job_category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            hashid: generate_hashid(),
            board_id,
            headline: headline.into(),
            description: String::new(),
            job_type: job_type.into(),
            job_category: job_category.into(),
            tags: Vec::new(),
            domain: None,
            geonameids: Vec::new(),
            remote_location: false,
            pay_currency: None,
            pay_cash_min: None,
            pay_cash_max: None,
            equity: false,
            datetime: Utc::now(),
        }
    }

    pub fn normalize(&mut self) {
        self.headline = self.headline.trim().to_string();
        self.tags = sorted_names(&self.tags);
        self.geonameids = sorted_ids(&self.geonameids);
        self.pay_currency = self
            .pay_currency
            .as_deref()
            .map(|c| normalize_currency(c).unwrap_or_else(|| c.to_string()));
        // A single bound is treated as a fixed amount
        match (self.pay_cash_min, self.pay_cash_max) {
            (Some(min), None) => self.pay_cash_max = Some(min),
            (None, Some(max)) => self.pay_cash_min = Some(max),
            _ => {}
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.headline.is_empty() {
            return Err(DomainError::Validation("Headline is required".into()));
        }
        if self.headline.chars().count() > MAX_HEADLINE_LENGTH {
            return Err(DomainError::Validation(format!(
                "Headline must be at most {} characters",
                MAX_HEADLINE_LENGTH
            )));
        }
        if let (Some(min), Some(max)) = (self.pay_cash_min, self.pay_cash_max) {
            if min < 0 || max < min {
                return Err(DomainError::Validation("Invalid pay range".into()));
            }
            match &self.pay_currency {
                Some(c) if normalize_currency(c).as_deref() == Some(c.as_str()) => {}
                _ => {
                    return Err(DomainError::Validation(
                        "A valid currency is required when pay is specified".into(),
                    ))
                }
            }
        }
        Ok(())
    }

    pub fn url_path(&self) -> String {
        format!("/view/{}", self.hashid)
    }
}

/// Random lowercase alphanumeric identifier
pub fn generate_hashid() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(HASHID_LENGTH)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashid_shape() {
        let id = generate_hashid();
        assert_eq!(id.len(), HASHID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn single_pay_bound_becomes_fixed_amount() {
        let mut job = JobPost::new(1, "Rust engineer", "fulltime", "programming");
        job.pay_cash_min = Some(100);
        job.pay_currency = Some("usd".into());
        job.normalize();
        assert_eq!(job.pay_cash_max, Some(100));
        assert_eq!(job.pay_currency.as_deref(), Some("USD"));
        assert!(job.validate().is_ok());
    }

    #[test]
    fn pay_without_currency_is_rejected() {
        let mut job = JobPost::new(1, "Rust engineer", "fulltime", "programming");
        job.pay_cash_min = Some(100);
        job.pay_cash_max = Some(200);
        job.normalize();
        assert!(job.validate().is_err());
    }

    #[test]
    fn inverted_pay_range_is_rejected() {
        let mut job = JobPost::new(1, "Rust engineer", "fulltime", "programming");
        job.pay_cash_min = Some(300);
        job.pay_cash_max = Some(200);
        job.pay_currency = Some("USD".into());
        assert!(job.validate().is_err());
    }

    #[test]
    fn blank_headline_is_rejected() {
        let mut job = JobPost::new(1, "   ", "fulltime", "programming");
        job.normalize();
        assert!(job.validate().is_err());
    }
}
