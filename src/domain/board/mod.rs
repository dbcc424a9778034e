//! Board aggregate
//!
//! A board is the tenant under which job posts and filter sets live.

pub mod model;
pub mod repository;

pub use model::Board;
pub use repository::BoardRepository;
