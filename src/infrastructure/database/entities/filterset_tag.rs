//! Filterset ↔ tag association

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "filterset_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub filterset_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::filterset::Entity",
        from = "Column::FiltersetId",
        to = "super::filterset::Column::Id",
        on_delete = "Cascade"
    )]
    Filterset,
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id"
    )]
    Tag,
}

impl ActiveModelBehavior for ActiveModel {}
