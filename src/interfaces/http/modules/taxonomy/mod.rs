//! Taxonomy module: job types, categories, tags and domains

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
