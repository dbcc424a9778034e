//! Filterset aggregate
//!
//! Contains the Filterset entity, the canonical filter criteria and the
//! repository interface.

pub mod criteria;
pub mod model;
pub mod repository;

pub use criteria::FilterCriteria;
pub use model::Filterset;
pub use repository::FiltersetRepository;

/// Message returned when two filter sets of a board share their criteria
pub const DUPLICATE_CRITERIA_MESSAGE: &str =
    "There already exists a filter set with this filter criteria";
