//! Job post aggregate

pub mod model;
pub mod repository;

pub use model::JobPost;
pub use repository::JobPostRepository;
