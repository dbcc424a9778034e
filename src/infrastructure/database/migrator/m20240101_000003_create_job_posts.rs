//! Create job posts with their tag and location associations

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_boards::Board;
use super::m20240101_000002_create_taxonomy::{Domain, Jobcategory, Jobtype, Tag};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobpost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Jobpost::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Jobpost::Hashid)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Jobpost::BoardId).integer().not_null())
                    .col(ColumnDef::new(Jobpost::Headline).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Jobpost::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Jobpost::JobtypeId).integer().not_null())
                    .col(ColumnDef::new(Jobpost::JobcategoryId).integer().not_null())
                    .col(ColumnDef::new(Jobpost::DomainId).integer())
                    .col(
                        ColumnDef::new(Jobpost::RemoteLocation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Jobpost::PayCurrency).char_len(3))
                    .col(ColumnDef::new(Jobpost::PayCashMin).big_integer())
                    .col(ColumnDef::new(Jobpost::PayCashMax).big_integer())
                    .col(
                        ColumnDef::new(Jobpost::Equity)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Jobpost::Datetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_board")
                            .from(Jobpost::Table, Jobpost::BoardId)
                            .to(Board::Table, Board::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_jobtype")
                            .from(Jobpost::Table, Jobpost::JobtypeId)
                            .to(Jobtype::Table, Jobtype::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_jobcategory")
                            .from(Jobpost::Table, Jobpost::JobcategoryId)
                            .to(Jobcategory::Table, Jobcategory::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_domain")
                            .from(Jobpost::Table, Jobpost::DomainId)
                            .to(Domain::Table, Domain::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_jobpost_board_id")
                    .table(Jobpost::Table)
                    .col(Jobpost::BoardId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobpostTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobpostTag::JobpostId).integer().not_null())
                    .col(ColumnDef::new(JobpostTag::TagId).integer().not_null())
                    .col(
                        ColumnDef::new(JobpostTag::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(JobpostTag::JobpostId)
                            .col(JobpostTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_tag_jobpost")
                            .from(JobpostTag::Table, JobpostTag::JobpostId)
                            .to(Jobpost::Table, Jobpost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_tag_tag")
                            .from(JobpostTag::Table, JobpostTag::TagId)
                            .to(Tag::Table, Tag::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_jobpost_tag_tag_id")
                    .table(JobpostTag::Table)
                    .col(JobpostTag::TagId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobpostLocation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobpostLocation::JobpostId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobpostLocation::Geonameid)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(JobpostLocation::JobpostId)
                            .col(JobpostLocation::Geonameid),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobpost_location_jobpost")
                            .from(JobpostLocation::Table, JobpostLocation::JobpostId)
                            .to(Jobpost::Table, Jobpost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_jobpost_location_geonameid")
                    .table(JobpostLocation::Table)
                    .col(JobpostLocation::Geonameid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobpostLocation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JobpostTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobpost::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Jobpost {
    Table,
    Id,
    Hashid,
    BoardId,
    Headline,
    Description,
    JobtypeId,
    JobcategoryId,
    DomainId,
    RemoteLocation,
    PayCurrency,
    PayCashMin,
    PayCashMax,
    Equity,
    Datetime,
}

#[derive(Iden)]
pub enum JobpostTag {
    Table,
    JobpostId,
    TagId,
    CreatedAt,
}

#[derive(Iden)]
pub enum JobpostLocation {
    Table,
    JobpostId,
    Geonameid,
}
