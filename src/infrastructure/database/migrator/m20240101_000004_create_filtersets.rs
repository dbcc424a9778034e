//! Create filter sets and their association tables
//!
//! Each association table has a composite primary key, an index on the
//! associated item and a creation timestamp.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_boards::Board;
use super::m20240101_000002_create_taxonomy::{Domain, Jobcategory, Jobtype, Tag};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `(filterset_id, <item>_id, created_at)` association table
fn association_table(
    table: impl IntoIden + Clone + 'static,
    filterset_id: impl IntoIden + Clone + 'static,
    item_id: impl IntoIden + Clone + 'static,
    created_at: impl IntoIden + 'static,
    item_table: impl IntoIden + 'static,
    item_table_id: impl IntoIden + 'static,
    fk_prefix: &str,
) -> TableCreateStatement {
    Table::create()
        .table(table.clone())
        .if_not_exists()
        .col(ColumnDef::new(filterset_id.clone()).integer().not_null())
        .col(ColumnDef::new(item_id.clone()).integer().not_null())
        .col(
            ColumnDef::new(created_at)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .primary_key(
            Index::create()
                .col(filterset_id.clone())
                .col(item_id.clone()),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_filterset", fk_prefix))
                .from(table.clone(), filterset_id)
                .to(Filterset::Table, Filterset::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_item", fk_prefix))
                .from(table, item_id)
                .to(item_table, item_table_id),
        )
        .to_owned()
}

fn item_index(name: &str, table: impl IntoIden + 'static, col: impl IntoIden + 'static) -> IndexCreateStatement {
    Index::create().name(name).table(table).col(col).to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Filterset::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Filterset::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Filterset::BoardId).integer().not_null())
                    .col(ColumnDef::new(Filterset::Name).string_len(250).not_null())
                    .col(ColumnDef::new(Filterset::Title).string_len(250).not_null())
                    .col(
                        ColumnDef::new(Filterset::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Filterset::Geonameids)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Filterset::RemoteLocation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Filterset::PayCurrency).char_len(3))
                    .col(ColumnDef::new(Filterset::PayCash).big_integer())
                    .col(
                        ColumnDef::new(Filterset::Equity)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Filterset::Keywords)
                            .string_len(250)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Filterset::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Filterset::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_filterset_board")
                            .from(Filterset::Table, Filterset::BoardId)
                            .to(Board::Table, Board::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_filterset_board_id_name")
                    .table(Filterset::Table)
                    .col(Filterset::BoardId)
                    .col(Filterset::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("ix_filterset_board_id", Filterset::BoardId),
            ("ix_filterset_geonameids", Filterset::Geonameids),
            ("ix_filterset_remote_location", Filterset::RemoteLocation),
            ("ix_filterset_pay_currency", Filterset::PayCurrency),
            ("ix_filterset_pay_cash", Filterset::PayCash),
            ("ix_filterset_equity", Filterset::Equity),
            ("ix_filterset_keywords", Filterset::Keywords),
        ] {
            manager
                .create_index(item_index(name, Filterset::Table, col))
                .await?;
        }

        manager
            .create_table(association_table(
                FiltersetJobtype::Table,
                FiltersetJobtype::FiltersetId,
                FiltersetJobtype::JobtypeId,
                FiltersetJobtype::CreatedAt,
                Jobtype::Table,
                Jobtype::Id,
                "filterset_jobtype",
            ))
            .await?;
        manager
            .create_index(item_index(
                "ix_filterset_jobtype_jobtype_id",
                FiltersetJobtype::Table,
                FiltersetJobtype::JobtypeId,
            ))
            .await?;

        manager
            .create_table(association_table(
                FiltersetJobcategory::Table,
                FiltersetJobcategory::FiltersetId,
                FiltersetJobcategory::JobcategoryId,
                FiltersetJobcategory::CreatedAt,
                Jobcategory::Table,
                Jobcategory::Id,
                "filterset_jobcategory",
            ))
            .await?;
        manager
            .create_index(item_index(
                "ix_filterset_jobcategory_jobcategory_id",
                FiltersetJobcategory::Table,
                FiltersetJobcategory::JobcategoryId,
            ))
            .await?;

        manager
            .create_table(association_table(
                FiltersetTag::Table,
                FiltersetTag::FiltersetId,
                FiltersetTag::TagId,
                FiltersetTag::CreatedAt,
                Tag::Table,
                Tag::Id,
                "filterset_tag",
            ))
            .await?;
        manager
            .create_index(item_index(
                "ix_filterset_tag_tag_id",
                FiltersetTag::Table,
                FiltersetTag::TagId,
            ))
            .await?;

        manager
            .create_table(association_table(
                FiltersetDomain::Table,
                FiltersetDomain::FiltersetId,
                FiltersetDomain::DomainId,
                FiltersetDomain::CreatedAt,
                Domain::Table,
                Domain::Id,
                "filterset_domain",
            ))
            .await?;
        manager
            .create_index(item_index(
                "ix_filterset_domain_domain_id",
                FiltersetDomain::Table,
                FiltersetDomain::DomainId,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FiltersetDomain::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FiltersetTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FiltersetJobcategory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FiltersetJobtype::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Filterset::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
pub enum Filterset {
    Table,
    Id,
    BoardId,
    Name,
    Title,
    Description,
    Geonameids,
    RemoteLocation,
    PayCurrency,
    PayCash,
    Equity,
    Keywords,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum FiltersetJobtype {
    Table,
    FiltersetId,
    JobtypeId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum FiltersetJobcategory {
    Table,
    FiltersetId,
    JobcategoryId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum FiltersetTag {
    Table,
    FiltersetId,
    TagId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum FiltersetDomain {
    Table,
    FiltersetId,
    DomainId,
    CreatedAt,
}
