//! Filter set management
//!
//! Filter sets are addressed by board name and filter set name. Tag titles
//! in the criteria are turned into tags when a filter set is written, in the
//! same transaction; every other item must already exist. Lookups accept
//! tag titles too but never create tags.

use std::sync::Arc;

use tracing::info;

use super::taxonomy::TaxonomyService;
use crate::domain::board::Board;
use crate::domain::filterset::{FilterCriteria, Filterset};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Fields accepted when creating or updating a filter set
#[derive(Debug, Clone, Default)]
pub struct FiltersetInput {
    /// URL name; derived from the title when empty
    pub name: Option<String>,
    pub title: String,
    pub description: String,
    pub filters: FilterCriteria,
}

pub struct FiltersetService {
    repos: Arc<dyn RepositoryProvider>,
}

impl FiltersetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn board(&self, board_name: &str) -> DomainResult<Board> {
        self.repos
            .boards()
            .find_by_name(board_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", "name", board_name))
    }

    pub async fn list(&self, board_name: &str) -> DomainResult<Vec<Filterset>> {
        let board = self.board(board_name).await?;
        self.repos.filtersets().find_all_for_board(board.id).await
    }

    pub async fn get(&self, board_name: &str, name: &str) -> DomainResult<Filterset> {
        let board = self.board(board_name).await?;
        self.repos
            .filtersets()
            .find_by_name(board.id, name)
            .await?
            .ok_or_else(|| DomainError::not_found("Filterset", "name", name))
    }

    /// The filter set whose criteria equal `filters` exactly
    pub async fn lookup(
        &self,
        board_name: &str,
        filters: &FilterCriteria,
    ) -> DomainResult<Option<Filterset>> {
        let board = self.board(board_name).await?;
        let mut filters = filters.clone();
        filters.tags = TaxonomyService::tag_names(&filters.tags);
        self.repos.filtersets().find_by_filters(board.id, &filters).await
    }

    pub async fn create(&self, board_name: &str, input: FiltersetInput) -> DomainResult<Filterset> {
        let board = self.board(board_name).await?;

        let mut fs = Filterset::new(board.id, input.name.unwrap_or_default(), input.title);
        fs.description = input.description;
        fs.apply_filters(&input.filters);

        let fs = self.repos.filtersets().save(fs).await?;
        info!(board = %board.name, filterset = %fs.name, "Filter set created");
        Ok(fs)
    }

    /// Replace title, description and criteria. A new name may be given.
    pub async fn update(
        &self,
        board_name: &str,
        name: &str,
        input: FiltersetInput,
    ) -> DomainResult<Filterset> {
        let mut fs = self.get(board_name, name).await?;

        if let Some(new_name) = input.name.filter(|n| !n.trim().is_empty()) {
            fs.name = new_name;
        }
        fs.title = input.title;
        fs.description = input.description;
        fs.apply_filters(&input.filters);

        let fs = self.repos.filtersets().update(fs).await?;
        info!(filterset = %fs.name, "Filter set updated");
        Ok(fs)
    }

    pub async fn delete(&self, board_name: &str, name: &str) -> DomainResult<()> {
        let board = self.board(board_name).await?;
        self.repos.filtersets().delete(board.id, name).await?;
        info!(board = %board.name, filterset = %name, "Filter set deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::seeded_repos;
    use crate::domain::filterset::DUPLICATE_CRITERIA_MESSAGE;
    use crate::domain::taxonomy::TaxonomyKind;

    fn ml_input() -> FiltersetInput {
        FiltersetInput {
            name: None,
            title: "Machine learning jobs in Bangalore".into(),
            description: "Welcome".into(),
            filters: FilterCriteria {
                tags: vec!["Python".into(), "Machine Learning".into()],
                geonameids: vec![1277333],
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn create_derives_name_and_tags() {
        let service = FiltersetService::new(seeded_repos().await);
        let fs = service.create("www", ml_input()).await.unwrap();
        assert_eq!(fs.name, "machine-learning-jobs-in-bangalore");
        assert_eq!(fs.tags, vec!["machine-learning", "python"]);
        assert_eq!(fs.url_path(), "/f/machine-learning-jobs-in-bangalore");

        let got = service.get("www", &fs.name).await.unwrap();
        assert_eq!(got.id, fs.id);
    }

    #[tokio::test]
    async fn lookup_accepts_tag_names_in_any_order() {
        let service = FiltersetService::new(seeded_repos().await);
        let fs = service.create("www", ml_input()).await.unwrap();

        let hit = service
            .lookup(
                "www",
                &FilterCriteria {
                    tags: vec!["python".into(), "machine-learning".into()],
                    geonameids: vec![1277333],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(hit.map(|f| f.id), Some(fs.id));

        let miss = service.lookup("rust", &fs.to_filters()).await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn lookup_accepts_the_titles_used_on_create() {
        let repos = seeded_repos().await;
        let service = FiltersetService::new(repos.clone());
        let fs = service.create("www", ml_input()).await.unwrap();

        let hit = service.lookup("www", &ml_input().filters).await.unwrap();
        assert_eq!(hit.map(|f| f.id), Some(fs.id));

        let mut unknown = ml_input().filters;
        unknown.tags.push("Deep Learning".into());
        assert!(service.lookup("www", &unknown).await.unwrap().is_none());
        let tags = TaxonomyService::new(repos).list(TaxonomyKind::Tag).await.unwrap();
        assert!(tags.iter().all(|t| t.name != "deep-learning"));
    }

    #[tokio::test]
    async fn rejected_create_leaves_no_new_tags() {
        let repos = seeded_repos().await;
        let service = FiltersetService::new(repos.clone());
        let fs = service.create("www", ml_input()).await.unwrap();

        let mut clash = ml_input();
        clash.name = Some(fs.name.clone());
        clash.filters.tags = vec!["Deep Learning".into()];
        let err = service.create("www", clash).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let tags = TaxonomyService::new(repos).list(TaxonomyKind::Tag).await.unwrap();
        assert!(tags.iter().all(|t| t.name != "deep-learning"));
    }

    #[tokio::test]
    async fn duplicate_criteria_conflict() {
        let service = FiltersetService::new(seeded_repos().await);
        service.create("www", ml_input()).await.unwrap();

        let mut again = ml_input();
        again.name = Some("ml-bangalore".into());
        let err = service.create("www", again).await.unwrap_err();
        assert_eq!(err.to_string(), DUPLICATE_CRITERIA_MESSAGE);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let service = FiltersetService::new(seeded_repos().await);
        let fs = service.create("www", ml_input()).await.unwrap();

        let mut input = ml_input();
        input.name = Some("ml-blr".into());
        input.filters.types = vec!["full-time".into()];
        let updated = service.update("www", &fs.name, input).await.unwrap();
        assert_eq!(updated.id, fs.id);
        assert_eq!(updated.name, "ml-blr");
        assert_eq!(updated.types, vec!["full-time"]);

        assert!(matches!(
            service.get("www", &fs.name).await,
            Err(DomainError::NotFound { .. })
        ));

        service.delete("www", "ml-blr").await.unwrap();
        assert!(service.list("www").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_board_is_not_found() {
        let service = FiltersetService::new(seeded_repos().await);
        let err = service.create("nope", ml_input()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Board", .. }));
    }
}
