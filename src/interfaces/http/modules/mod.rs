//! HTTP modules, one per resource

pub mod boards;
pub mod filtersets;
pub mod health;
pub mod jobs;
pub mod public;
pub mod request_id;
pub mod taxonomy;
