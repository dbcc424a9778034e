//! Taxonomy domain entities

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;
use crate::shared::validations::{is_valid_slug, slugify};

/// Which lookup table an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    JobType,
    JobCategory,
    Tag,
    Domain,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 4] = [
        TaxonomyKind::JobType,
        TaxonomyKind::JobCategory,
        TaxonomyKind::Tag,
        TaxonomyKind::Domain,
    ];

    /// Path segment used by the admin API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JobType => "job-types",
            Self::JobCategory => "job-categories",
            Self::Tag => "tags",
            Self::Domain => "domains",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "job-types" => Some(Self::JobType),
            "job-categories" => Some(Self::JobCategory),
            "tags" => Some(Self::Tag),
            "domains" => Some(Self::Domain),
            _ => None,
        }
    }

    /// Entity label used in error messages
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::JobType => "JobType",
            Self::JobCategory => "JobCategory",
            Self::Tag => "Tag",
            Self::Domain => "Domain",
        }
    }
}

impl std::fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A job type, category, tag or domain
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyItem {
    pub id: i32,
    pub kind: TaxonomyKind,
    pub name: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl TaxonomyItem {
    /// Build an item from its title. Domains keep the lowercased hostname as
    /// their name since dots are significant there.
    pub fn from_title(kind: TaxonomyKind, title: impl Into<String>) -> Self {
        let title = title.into();
        let name = match kind {
            TaxonomyKind::Domain => title.trim().to_ascii_lowercase(),
            _ => slugify(&title),
        };
        Self {
            id: 0,
            kind,
            name,
            title,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let valid = match self.kind {
            TaxonomyKind::Domain => is_valid_domain(&self.name),
            _ => is_valid_slug(&self.name),
        };
        if !valid {
            return Err(DomainError::Validation(format!(
                "Invalid {} name '{}'",
                self.kind.entity_name(),
                self.name
            )));
        }
        Ok(())
    }
}

/// Lowercase hostname with at least one dot
pub fn is_valid_domain(name: &str) -> bool {
    name.contains('.')
        && !name.starts_with('.')
        && !name.ends_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_path_roundtrip() {
        for kind in TaxonomyKind::ALL {
            assert_eq!(TaxonomyKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TaxonomyKind::from_str("locations"), None);
    }

    #[test]
    fn tag_name_is_slugified_title() {
        let tag = TaxonomyItem::from_title(TaxonomyKind::Tag, "Machine Learning");
        assert_eq!(tag.name, "machine-learning");
        assert_eq!(tag.title, "Machine Learning");
        assert!(tag.validate().is_ok());
    }

    #[test]
    fn domain_keeps_dots() {
        let domain = TaxonomyItem::from_title(TaxonomyKind::Domain, "Example.COM");
        assert_eq!(domain.name, "example.com");
        assert!(domain.validate().is_ok());
        assert!(TaxonomyItem::from_title(TaxonomyKind::Domain, "localhost")
            .validate()
            .is_err());
    }
}
