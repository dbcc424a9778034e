//! Create the lookup tables: job types, job categories, tags and domains
//!
//! The four tables share one layout: a unique URL name plus a title.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Table iden plus its `(id, name, title, created_at)` columns
fn lookup_table(
    table: impl IntoIden + 'static,
    id: impl IntoIden + 'static,
    name: impl IntoIden + 'static,
    title: impl IntoIden + 'static,
    created_at: impl IntoIden + 'static,
) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(name)
                .string_len(250)
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(title).string_len(250).not_null())
        .col(
            ColumnDef::new(created_at)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(lookup_table(
                Jobtype::Table,
                Jobtype::Id,
                Jobtype::Name,
                Jobtype::Title,
                Jobtype::CreatedAt,
            ))
            .await?;

        manager
            .create_table(lookup_table(
                Jobcategory::Table,
                Jobcategory::Id,
                Jobcategory::Name,
                Jobcategory::Title,
                Jobcategory::CreatedAt,
            ))
            .await?;

        manager
            .create_table(lookup_table(
                Tag::Table,
                Tag::Id,
                Tag::Name,
                Tag::Title,
                Tag::CreatedAt,
            ))
            .await?;

        manager
            .create_table(lookup_table(
                Domain::Table,
                Domain::Id,
                Domain::Name,
                Domain::Title,
                Domain::CreatedAt,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Domain::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobcategory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobtype::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Jobtype {
    Table,
    Id,
    Name,
    Title,
    CreatedAt,
}

#[derive(Iden)]
pub enum Jobcategory {
    Table,
    Id,
    Name,
    Title,
    CreatedAt,
}

#[derive(Iden)]
pub enum Tag {
    Table,
    Id,
    Name,
    Title,
    CreatedAt,
}

#[derive(Iden)]
pub enum Domain {
    Table,
    Id,
    Name,
    Title,
    CreatedAt,
}
