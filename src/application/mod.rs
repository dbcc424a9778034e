//! Application layer: use cases orchestrating the domain repositories

pub mod host;
pub mod services;

pub use host::board_name_from_host;
pub use services::{
    BoardService, FiltersetInput, FiltersetService, JobPostService, ListingService, BoardListing,
    FiltersetPage, TaxonomyService, DEFAULT_LISTING_LIMIT,
};
