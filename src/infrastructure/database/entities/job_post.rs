//! Job post entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobpost")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public identifier
    #[sea_orm(unique)]
    pub hashid: String,

    pub board_id: i32,

    pub headline: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub jobtype_id: i32,
    pub jobcategory_id: i32,

    #[sea_orm(nullable)]
    pub domain_id: Option<i32>,

    pub remote_location: bool,

    #[sea_orm(nullable)]
    pub pay_currency: Option<String>,
    #[sea_orm(nullable)]
    pub pay_cash_min: Option<i64>,
    #[sea_orm(nullable)]
    pub pay_cash_max: Option<i64>,

    pub equity: bool,

    /// Posting time (indexed, listings sort on it)
    pub datetime: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::board::Entity",
        from = "Column::BoardId",
        to = "super::board::Column::Id"
    )]
    Board,
    #[sea_orm(
        belongs_to = "super::job_type::Entity",
        from = "Column::JobtypeId",
        to = "super::job_type::Column::Id"
    )]
    JobType,
    #[sea_orm(
        belongs_to = "super::job_category::Entity",
        from = "Column::JobcategoryId",
        to = "super::job_category::Column::Id"
    )]
    JobCategory,
    #[sea_orm(
        belongs_to = "super::domain::Entity",
        from = "Column::DomainId",
        to = "super::domain::Column::Id"
    )]
    Domain,
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl Related<super::job_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobType.def()
    }
}

impl Related<super::job_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobCategory.def()
    }
}

impl Related<super::domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
