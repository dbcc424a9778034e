//! Application services
//!
//! HTTP handlers are thin wrappers that delegate to these services.

mod board;
mod filterset;
mod job_post;
mod listing;
mod taxonomy;

pub use board::BoardService;
pub use filterset::{FiltersetInput, FiltersetService};
pub use job_post::JobPostService;
pub use listing::{BoardListing, FiltersetPage, ListingService, DEFAULT_LISTING_LIMIT};
pub use taxonomy::TaxonomyService;
