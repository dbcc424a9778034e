//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_boards;
mod m20240101_000002_create_taxonomy;
mod m20240101_000003_create_job_posts;
mod m20240101_000004_create_filtersets;
mod m20240101_000005_index_job_post_datetime;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_boards::Migration),
            Box::new(m20240101_000002_create_taxonomy::Migration),
            Box::new(m20240101_000003_create_job_posts::Migration),
            Box::new(m20240101_000004_create_filtersets::Migration),
            Box::new(m20240101_000005_index_job_post_datetime::Migration),
        ]
    }
}
