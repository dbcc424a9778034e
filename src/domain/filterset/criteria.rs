//! Canonical filter dictionary
//!
//! The same criteria drive two lookups: exact fingerprint matching of saved
//! filter sets and match-any filtering of job listings.

use crate::shared::validations::normalize_currency;

/// Job filter criteria. Wire keys: `t`, `c`, `k`, `d`, `l`, `currency`,
/// `pay`, `equity`, `anywhere`, `q`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// Job type names (`t`)
    pub types: Vec<String>,
    /// Job category names (`c`)
    pub categories: Vec<String>,
    /// Tag names (`k`)
    pub tags: Vec<String>,
    /// Employer domain names (`d`)
    pub domains: Vec<String>,
    /// Geoname IDs (`l`)
    pub geonameids: Vec<i64>,
    pub currency: Option<String>,
    pub pay: Option<i64>,
    pub equity: bool,
    /// Remote-friendly jobs (`anywhere`)
    pub anywhere: bool,
    /// Free-text keywords (`q`)
    pub keywords: String,
}

impl FilterCriteria {
    /// Canonical form: lists sorted and deduplicated, keywords trimmed,
    /// currency upper-cased. Pay and currency survive only as a pair with a
    /// positive amount.
    pub fn normalized(&self) -> Self {
        let currency = self.currency.as_deref().and_then(normalize_currency);
        let pay = self.pay.filter(|p| *p > 0);
        let (currency, pay) = match (currency, pay) {
            (Some(c), Some(p)) => (Some(c), Some(p)),
            _ => (None, None),
        };

        Self {
            types: sorted_names(&self.types),
            categories: sorted_names(&self.categories),
            tags: sorted_names(&self.tags),
            domains: sorted_names(&self.domains),
            geonameids: sorted_ids(&self.geonameids),
            currency,
            pay,
            equity: self.equity,
            anywhere: self.anywhere,
            keywords: self.keywords.trim().to_string(),
        }
    }

    /// The pay criterion, present only when both halves are given
    pub fn pay_filter(&self) -> Option<(i64, &str)> {
        match (self.pay, self.currency.as_deref()) {
            (Some(pay), Some(currency)) if pay > 0 && !currency.is_empty() => {
                Some((pay, currency))
            }
            _ => None,
        }
    }

    /// True when no criterion is set at all
    pub fn is_empty(&self) -> bool {
        self.normalized() == Self::default()
    }
}

/// Sort, trim and deduplicate names, dropping blanks.
pub fn sorted_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Sort and deduplicate geoname IDs.
pub fn sorted_ids(ids: &[i64]) -> Vec<i64> {
    let mut out = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}
