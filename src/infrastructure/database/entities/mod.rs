//! Database entities module

pub mod board;
pub mod domain;
pub mod filterset;
pub mod filterset_domain;
pub mod filterset_job_category;
pub mod filterset_job_type;
pub mod filterset_tag;
pub mod job_category;
pub mod job_post;
pub mod job_post_location;
pub mod job_post_tag;
pub mod job_type;
pub mod tag;

pub use board::Entity as Board;
pub use domain::Entity as Domain;
pub use filterset::Entity as Filterset;
pub use job_category::Entity as JobCategory;
pub use job_post::Entity as JobPost;
pub use job_type::Entity as JobType;
pub use tag::Entity as Tag;
