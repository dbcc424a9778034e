//! Job post DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::JobPost;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobPostResponse {
    pub hashid: String,
    pub headline: String,
    pub description: String,
    pub job_type: String,
    pub job_category: String,
    pub tags: Vec<String>,
    pub domain: Option<String>,
    pub geonameids: Vec<i64>,
    pub remote_location: bool,
    pub pay_currency: Option<String>,
    pub pay_cash_min: Option<i64>,
    pub pay_cash_max: Option<i64>,
    pub equity: bool,
    pub datetime: DateTime<Utc>,
    pub url: String,
}

impl From<JobPost> for JobPostResponse {
    fn from(j: JobPost) -> Self {
        Self {
            url: j.url_path(),
            hashid: j.hashid,
            headline: j.headline,
            description: j.description,
            job_type: j.job_type,
            job_category: j.job_category,
            tags: j.tags,
            domain: j.domain,
            geonameids: j.geonameids,
            remote_location: j.remote_location,
            pay_currency: j.pay_currency,
            pay_cash_min: j.pay_cash_min,
            pay_cash_max: j.pay_cash_max,
            equity: j.equity,
            datetime: j.datetime,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJobPostRequest {
    #[validate(length(min = 1, max = 100, message = "headline must be 1-100 characters"))]
    pub headline: String,
    #[serde(default)]
    pub description: String,
    /// Job type name
    #[validate(length(min = 1, message = "job_type is required"))]
    pub job_type: String,
    /// Job category name
    #[validate(length(min = 1, message = "job_category is required"))]
    pub job_category: String,
    /// Tag names or titles; missing tags are created
    #[serde(default)]
    pub tags: Vec<String>,
    /// Employer domain name
    pub domain: Option<String>,
    #[serde(default)]
    pub geonameids: Vec<i64>,
    #[serde(default)]
    pub remote_location: bool,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub pay_currency: Option<String>,
    #[validate(range(min = 0))]
    pub pay_cash_min: Option<i64>,
    #[validate(range(min = 0))]
    pub pay_cash_max: Option<i64>,
    #[serde(default)]
    pub equity: bool,
}

impl CreateJobPostRequest {
    pub fn into_job_post(self) -> JobPost {
        let mut job = JobPost::new(0, self.headline, self.job_type, self.job_category);
        job.description = self.description;
        job.tags = self.tags;
        job.domain = self.domain.filter(|d| !d.trim().is_empty());
        job.geonameids = self.geonameids;
        job.remote_location = self.remote_location;
        job.pay_currency = self.pay_currency;
        job.pay_cash_min = self.pay_cash_min;
        job.pay_cash_max = self.pay_cash_max;
        job.equity = self.equity;
        job
    }
}
