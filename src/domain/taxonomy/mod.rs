//! Taxonomy lookups: job types, job categories, tags and employer domains

pub mod model;
pub mod repository;

pub use model::{TaxonomyItem, TaxonomyKind};
pub use repository::TaxonomyRepository;
