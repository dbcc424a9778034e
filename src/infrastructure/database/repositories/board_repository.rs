//! SeaORM implementation of BoardRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::board::{Board, BoardRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::board;

pub struct SeaOrmBoardRepository {
    db: DatabaseConnection,
}

impl SeaOrmBoardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: board::Model) -> Board {
    Board {
        id: m.id,
        name: m.name,
        title: m.title,
        description: m.description,
        created_at: m.created_at,
    }
}

#[async_trait]
impl BoardRepository for SeaOrmBoardRepository {
    async fn save(&self, board: Board) -> DomainResult<Board> {
        board.validate()?;
        debug!("Saving board {}", board.name);

        if self.find_by_name(&board.name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "A board named '{}' already exists",
                board.name
            )));
        }

        let model = board::ActiveModel {
            id: NotSet,
            name: Set(board.name),
            title: Set(board.title),
            description: Set(board.description),
            created_at: Set(board.created_at),
        };
        let inserted = model.insert(&self.db).await?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Board>> {
        let model = board::Entity::find()
            .filter(board::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Board>> {
        let model = board::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Board>> {
        let models = board::Entity::find()
            .order_by_asc(board::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
