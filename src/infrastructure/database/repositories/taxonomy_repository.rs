//! SeaORM implementation of TaxonomyRepository
//!
//! The four lookup tables share one column layout; `with_entity!` picks the
//! entity module for a kind so each operation is written once.

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::taxonomy::{TaxonomyItem, TaxonomyKind, TaxonomyRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{domain, job_category, job_type, tag};

macro_rules! with_entity {
    ($kind:expr, $entity:ident => $body:expr) => {
        match $kind {
            TaxonomyKind::JobType => {
                use job_type as $entity;
                $body
            }
            TaxonomyKind::JobCategory => {
                use job_category as $entity;
                $body
            }
            TaxonomyKind::Tag => {
                use tag as $entity;
                $body
            }
            TaxonomyKind::Domain => {
                use domain as $entity;
                $body
            }
        }
    };
}

pub struct SeaOrmTaxonomyRepository {
    db: DatabaseConnection,
}

impl SeaOrmTaxonomyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaxonomyRepository for SeaOrmTaxonomyRepository {
    async fn save(&self, item: TaxonomyItem) -> DomainResult<TaxonomyItem> {
        item.validate()?;
        debug!("Saving {} '{}'", item.kind.entity_name(), item.name);

        if self.find_by_name(item.kind, &item.name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "{} '{}' already exists",
                item.kind.entity_name(),
                item.name
            )));
        }

        let kind = item.kind;
        with_entity!(kind, entity => {
            let m = entity::ActiveModel {
                id: NotSet,
                name: Set(item.name),
                title: Set(item.title),
                created_at: Set(item.created_at),
            }
            .insert(&self.db)
            .await?;
            Ok(TaxonomyItem {
                id: m.id,
                kind,
                name: m.name,
                title: m.title,
                created_at: m.created_at,
            })
        })
    }

    async fn find_by_name(
        &self,
        kind: TaxonomyKind,
        name: &str,
    ) -> DomainResult<Option<TaxonomyItem>> {
        with_entity!(kind, entity => {
            let model = entity::Entity::find()
                .filter(entity::Column::Name.eq(name))
                .one(&self.db)
                .await?;
            Ok(model.map(|m| TaxonomyItem {
                id: m.id,
                kind,
                name: m.name,
                title: m.title,
                created_at: m.created_at,
            }))
        })
    }

    async fn find_all(&self, kind: TaxonomyKind) -> DomainResult<Vec<TaxonomyItem>> {
        with_entity!(kind, entity => {
            let models = entity::Entity::find()
                .order_by_asc(entity::Column::Title)
                .all(&self.db)
                .await?;
            Ok(models
                .into_iter()
                .map(|m| TaxonomyItem {
                    id: m.id,
                    kind,
                    name: m.name,
                    title: m.title,
                    created_at: m.created_at,
                })
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::database::repositories::testing::test_repos;

    #[tokio::test]
    async fn each_kind_has_its_own_table() {
        let repos = test_repos().await;
        for kind in TaxonomyKind::ALL {
            let title = match kind {
                TaxonomyKind::Domain => "hasgeek.com",
                _ => "Design",
            };
            let saved = repos
                .taxonomy()
                .save(TaxonomyItem::from_title(kind, title))
                .await
                .unwrap();
            assert_eq!(saved.kind, kind);
        }

        let tag = repos
            .taxonomy()
            .find_by_name(TaxonomyKind::Tag, "design")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tag.title, "Design");
        assert!(repos
            .taxonomy()
            .find_by_name(TaxonomyKind::Tag, "hasgeek.com")
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            repos.taxonomy().find_all(TaxonomyKind::JobType).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let repos = test_repos().await;
        repos
            .taxonomy()
            .save(TaxonomyItem::from_title(TaxonomyKind::Tag, "Python"))
            .await
            .unwrap();
        let err = repos
            .taxonomy()
            .save(TaxonomyItem::from_title(TaxonomyKind::Tag, "python"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_names_are_rejected() {
        let repos = test_repos().await;
        let err = repos
            .taxonomy()
            .save(TaxonomyItem::from_title(TaxonomyKind::Domain, "not a domain"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
