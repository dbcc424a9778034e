//! Filterset ↔ job category association

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "filterset_jobcategory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub filterset_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub jobcategory_id: i32,
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
        belongs_to = "super::job_category::Entity",
        from = "Column::JobcategoryId",
        to = "super::job_category::Column::Id"
    )]
    JobCategory,
}

impl ActiveModelBehavior for ActiveModel {}
