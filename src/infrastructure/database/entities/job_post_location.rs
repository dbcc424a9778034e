//! Job post locations, one row per geoname ID

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jobpost_location")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub jobpost_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub geonameid: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_post::Entity",
        from = "Column::JobpostId",
        to = "super::job_post::Column::Id",
        on_delete = "Cascade"
    )]
    JobPost,
}

impl ActiveModelBehavior for ActiveModel {}
