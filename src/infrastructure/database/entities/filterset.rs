//! Filterset entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "filterset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub board_id: i32,

    /// URL name, unique per board
    pub name: String,
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Sorted geoname IDs as a JSON array, e.g. `[1264527,1277333]`
    #[sea_orm(column_type = "Text")]
    pub geonameids: String,

    pub remote_location: bool,

    #[sea_orm(nullable)]
    pub pay_currency: Option<String>,
    #[sea_orm(nullable)]
    pub pay_cash: Option<i64>,

    pub equity: bool,

    pub keywords: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::board::Entity",
        from = "Column::BoardId",
        to = "super::board::Column::Id"
    )]
    Board,
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
