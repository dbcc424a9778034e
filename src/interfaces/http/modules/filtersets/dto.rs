//! Filter set DTOs and the wire form of filter criteria

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::FiltersetInput;
use crate::domain::filterset::{FilterCriteria, Filterset};

/// Filter criteria with the short keys used in listing URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct FilterCriteriaDto {
    /// Job type names
    pub t: Vec<String>,
    /// Job category names
    pub c: Vec<String>,
    /// Tag names or titles
    pub k: Vec<String>,
    /// Employer domain names
    pub d: Vec<String>,
    /// Geoname IDs
    pub l: Vec<i64>,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: Option<String>,
    #[validate(range(min = 1, message = "pay must be positive"))]
    pub pay: Option<i64>,
    pub equity: bool,
    pub anywhere: bool,
    #[validate(length(max = 250, message = "keywords are limited to 250 characters"))]
    pub q: String,
}

impl From<FilterCriteriaDto> for FilterCriteria {
    fn from(dto: FilterCriteriaDto) -> Self {
        FilterCriteria {
            types: dto.t,
            categories: dto.c,
            tags: dto.k,
            domains: dto.d,
            geonameids: dto.l,
            currency: dto.currency,
            pay: dto.pay,
            equity: dto.equity,
            anywhere: dto.anywhere,
            keywords: dto.q,
        }
    }
}

impl From<FilterCriteria> for FilterCriteriaDto {
    fn from(f: FilterCriteria) -> Self {
        Self {
            t: f.types,
            c: f.categories,
            k: f.tags,
            d: f.domains,
            l: f.geonameids,
            currency: f.currency,
            pay: f.pay,
            equity: f.equity,
            anywhere: f.anywhere,
            q: f.keywords,
        }
    }
}

/// Filter criteria as listing query parameters. Lists are comma-separated,
/// e.g. `?t=full-time,contract&l=1277333&anywhere=1`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Job type names
    pub t: Option<String>,
    /// Job category names
    pub c: Option<String>,
    /// Tag names
    pub k: Option<String>,
    /// Employer domain names
    pub d: Option<String>,
    /// Geoname IDs
    pub l: Option<String>,
    pub currency: Option<String>,
    pub pay: Option<String>,
    pub equity: Option<String>,
    pub anywhere: Option<String>,
    /// Keywords
    pub q: Option<String>,
}

fn split_list(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn truthy(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"),
    }
}

impl From<FilterQuery> for FilterCriteria {
    /// Unparseable numbers are dropped rather than rejected, so a mangled
    /// link still lists jobs.
    fn from(q: FilterQuery) -> Self {
        FilterCriteria {
            types: split_list(&q.t),
            categories: split_list(&q.c),
            tags: split_list(&q.k),
            domains: split_list(&q.d),
            geonameids: split_list(&q.l)
                .iter()
                .filter_map(|id| id.parse().ok())
                .collect(),
            currency: q.currency.filter(|c| !c.trim().is_empty()),
            pay: q.pay.as_deref().and_then(|p| p.trim().parse().ok()),
            equity: truthy(&q.equity),
            anywhere: truthy(&q.anywhere),
            keywords: q.q.unwrap_or_default(),
        }
    }
}

/// Saved filter set
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FiltersetResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    /// Public page path on the board's host
    pub url: String,
    pub filters: FilterCriteriaDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Filterset> for FiltersetResponse {
    fn from(fs: Filterset) -> Self {
        Self {
            url: fs.url_path(),
            filters: fs.to_filters().into(),
            id: fs.id,
            name: fs.name,
            title: fs.title,
            description: fs.description,
            created_at: fs.created_at,
            updated_at: fs.updated_at,
        }
    }
}

/// Create or replace a filter set
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FiltersetRequest {
    /// URL name; derived from the title when omitted
    #[validate(length(min = 1, max = 250, message = "name must be 1-250 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 250, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(nested)]
    pub filters: FilterCriteriaDto,
}

impl From<FiltersetRequest> for FiltersetInput {
    fn from(req: FiltersetRequest) -> Self {
        FiltersetInput {
            name: req.name,
            title: req.title,
            description: req.description,
            filters: req.filters.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_lists_are_comma_separated() {
        let q = FilterQuery {
            t: Some("full-time, contract".into()),
            l: Some("1277333,abc,1264527".into()),
            anywhere: Some("1".into()),
            equity: Some("false".into()),
            pay: Some("1500000".into()),
            currency: Some("INR".into()),
            ..Default::default()
        };
        let f: FilterCriteria = q.into();
        assert_eq!(f.types, vec!["full-time", "contract"]);
        assert_eq!(f.geonameids, vec![1277333, 1264527]);
        assert!(f.anywhere);
        assert!(!f.equity);
        assert_eq!(f.pay_filter(), Some((1_500_000, "INR")));
    }

    #[test]
    fn empty_query_is_empty_criteria() {
        let f: FilterCriteria = FilterQuery::default().into();
        assert!(f.is_empty());
    }

    #[test]
    fn json_uses_short_keys() {
        let dto: FilterCriteriaDto =
            serde_json::from_str(r#"{"k": ["python"], "l": [1277333], "q": "ml"}"#).unwrap();
        let f: FilterCriteria = dto.into();
        assert_eq!(f.tags, vec!["python"]);
        assert_eq!(f.geonameids, vec![1277333]);
        assert_eq!(f.keywords, "ml");

        let back = serde_json::to_value(FilterCriteriaDto::from(f)).unwrap();
        assert_eq!(back["k"], serde_json::json!(["python"]));
        assert_eq!(back["anywhere"], serde_json::json!(false));
    }

    #[test]
    fn request_validation() {
        let bad: FiltersetRequest = serde_json::from_str(
            r#"{"title": "", "filters": {"currency": "RUPEES", "pay": 0}}"#,
        )
        .unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.errors().contains_key("filters"));
    }
}
