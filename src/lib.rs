//! # Job board service
//!
//! Job boards whose owners save uniquely named filter sets over the job
//! listing, served over HTTP.
//!
//! ## Architecture
//!
//! - **domain**: boards, taxonomy, job posts, filter sets and repository traits
//! - **application**: services orchestrating repositories, host resolution
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: axum router with Swagger documentation
//! - **server**: runtime lifecycle and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export HTTP router
pub use interfaces::http::{create_router, AppState};
