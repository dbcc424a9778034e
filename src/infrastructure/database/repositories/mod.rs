//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod associations;
pub mod board_repository;
pub mod filterset_repository;
pub mod job_post_repository;
pub mod repository_provider;
pub mod taxonomy_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

#[cfg(test)]
pub(crate) mod testing {
    use sea_orm::DatabaseConnection;
    use sea_orm_migration::MigratorTrait;

    use super::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    /// Fresh migrated in-memory database
    pub async fn test_db() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database");
        Migrator::up(&db, None).await.expect("migrations");
        db
    }

    pub async fn test_repos() -> SeaOrmRepositoryProvider {
        SeaOrmRepositoryProvider::new(test_db().await)
    }
}
