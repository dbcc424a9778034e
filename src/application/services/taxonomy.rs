//! Taxonomy management and tag auto-creation

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::taxonomy::{TaxonomyItem, TaxonomyKind};
use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::validations::slugify;

pub struct TaxonomyService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TaxonomyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, kind: TaxonomyKind) -> DomainResult<Vec<TaxonomyItem>> {
        self.repos.taxonomy().find_all(kind).await
    }

    pub async fn create(&self, kind: TaxonomyKind, title: &str) -> DomainResult<TaxonomyItem> {
        let item = self
            .repos
            .taxonomy()
            .save(TaxonomyItem::from_title(kind, title.trim()))
            .await?;
        info!(kind = %kind, name = %item.name, "Taxonomy item created");
        Ok(item)
    }

    /// Tag titles (or names) as sorted tag names, without creating anything.
    pub fn tag_names(titles: &[String]) -> Vec<String> {
        let mut names: Vec<String> = titles
            .iter()
            .map(|t| slugify(t))
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Resolve tag titles (or names) to tag names, creating missing tags.
    pub async fn ensure_tags(&self, titles: &[String]) -> DomainResult<Vec<String>> {
        let mut names = Vec::with_capacity(titles.len());
        for title in titles {
            let name = slugify(title);
            if name.is_empty() {
                continue;
            }
            if self
                .repos
                .taxonomy()
                .find_by_name(TaxonomyKind::Tag, &name)
                .await?
                .is_none()
            {
                debug!(tag = %name, "Creating tag");
                self.repos
                    .taxonomy()
                    .save(TaxonomyItem::from_title(TaxonomyKind::Tag, title.trim()))
                    .await?;
            }
            names.push(name);
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::seeded_repos;

    #[tokio::test]
    async fn ensure_tags_creates_missing_once() {
        let service = TaxonomyService::new(seeded_repos().await);
        let names = service
            .ensure_tags(&["Machine Learning".into(), "python".into(), "machine-learning".into()])
            .await
            .unwrap();
        assert_eq!(names, vec!["machine-learning", "python"]);

        let tags = service.list(TaxonomyKind::Tag).await.unwrap();
        assert_eq!(tags.len(), 2);
        let ml = tags.iter().find(|t| t.name == "machine-learning").unwrap();
        assert_eq!(ml.title, "Machine Learning");
    }

    #[tokio::test]
    async fn blank_titles_are_skipped() {
        let service = TaxonomyService::new(seeded_repos().await);
        let names = service.ensure_tags(&["  ".into(), "!!".into()]).await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn tag_names_do_not_create_tags() {
        let service = TaxonomyService::new(seeded_repos().await);
        let names = TaxonomyService::tag_names(&[
            "Machine Learning".into(),
            "python".into(),
            " ".into(),
            "machine-learning".into(),
        ]);
        assert_eq!(names, vec!["machine-learning", "python"]);
        assert!(service.list(TaxonomyKind::Tag).await.unwrap().is_empty());
    }
}
