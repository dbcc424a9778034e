//! Filter set module: CRUD and exact-criteria lookup

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
