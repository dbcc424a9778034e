//! Index job posts by posting time
//!
//! Listings are always ordered by `jobpost.datetime`; the index is
//! non-unique since several posts can share a timestamp.

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_job_posts::Jobpost;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("ix_jobpost_datetime")
                    .table(Jobpost::Table)
                    .col(Jobpost::Datetime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_jobpost_datetime")
                    .table(Jobpost::Table)
                    .to_owned(),
            )
            .await
    }
}
