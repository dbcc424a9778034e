//! SeaORM implementation of FiltersetRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::associations::ASSOCIATIONS;
use crate::domain::filterset::{
    FilterCriteria, Filterset, FiltersetRepository, DUPLICATE_CRITERIA_MESSAGE,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{filterset, tag};
use crate::shared::validations::slugify;

pub struct SeaOrmFiltersetRepository {
    db: DatabaseConnection,
}

impl SeaOrmFiltersetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

/// Canonical text form of a sorted geoname list, e.g. `[1,2,3]`
pub fn geonameids_to_text(ids: &[i64]) -> String {
    let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", parts.join(","))
}

pub fn geonameids_from_text(text: &str) -> DomainResult<Vec<i64>> {
    serde_json::from_str(text)
        .map_err(|e| DomainError::Database(format!("Corrupt geonameids '{}': {}", text, e)))
}

async fn load<C: ConnectionTrait>(conn: &C, m: filterset::Model) -> DomainResult<Filterset> {
    let mut lists: Vec<Vec<String>> = Vec::with_capacity(ASSOCIATIONS.len());
    for assoc in &ASSOCIATIONS {
        lists.push(assoc.load_names(conn, m.id).await?);
    }
    let mut lists = lists.into_iter();

    Ok(Filterset {
        id: m.id,
        board_id: m.board_id,
        name: m.name,
        title: m.title,
        description: m.description,
        types: lists.next().unwrap_or_default(),
        categories: lists.next().unwrap_or_default(),
        tags: lists.next().unwrap_or_default(),
        domains: lists.next().unwrap_or_default(),
        geonameids: geonameids_from_text(&m.geonameids)?,
        remote_location: m.remote_location,
        pay_currency: m.pay_currency,
        pay_cash: m.pay_cash,
        equity: m.equity,
        keywords: m.keywords,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn to_active(fs: &Filterset) -> filterset::ActiveModel {
    filterset::ActiveModel {
        id: if fs.id == 0 { NotSet } else { Set(fs.id) },
        board_id: Set(fs.board_id),
        name: Set(fs.name.clone()),
        title: Set(fs.title.clone()),
        description: Set(fs.description.clone()),
        geonameids: Set(geonameids_to_text(&fs.geonameids)),
        remote_location: Set(fs.remote_location),
        pay_currency: Set(fs.pay_currency.clone()),
        pay_cash: Set(fs.pay_cash),
        equity: Set(fs.equity),
        keywords: Set(fs.keywords.clone()),
        created_at: Set(fs.created_at),
        updated_at: Set(fs.updated_at),
    }
}

// ── Queries shared by reads and the write-time checks ───────────

/// Exact criteria lookup. Every criterion is constrained: an absent one
/// must be absent on the stored row too.
async fn find_by_filters_with<C: ConnectionTrait>(
    conn: &C,
    board_id: i32,
    filters: &FilterCriteria,
) -> DomainResult<Option<filterset::Model>> {
    let filters = filters.normalized();
    let mut query = filterset::Entity::find().filter(filterset::Column::BoardId.eq(board_id));

    for assoc in &ASSOCIATIONS {
        let names = assoc.criteria_names(&filters);
        query = if names.is_empty() {
            query.filter(filterset::Column::Id.not_in_subquery(assoc.any_association()))
        } else {
            query
                .filter(filterset::Column::Id.in_subquery(assoc.associated_with_all(names)))
                .filter(filterset::Column::Id.in_subquery(assoc.association_count(names.len())))
        };
    }

    query = query
        .filter(filterset::Column::Geonameids.eq(geonameids_to_text(&filters.geonameids)))
        .filter(filterset::Column::Equity.eq(filters.equity))
        .filter(filterset::Column::RemoteLocation.eq(filters.anywhere));

    query = match filters.pay_filter() {
        Some((pay, currency)) => query
            .filter(filterset::Column::PayCash.eq(pay))
            .filter(filterset::Column::PayCurrency.eq(currency)),
        None => query
            .filter(filterset::Column::PayCash.is_null())
            .filter(filterset::Column::PayCurrency.is_null()),
    };

    query = query.filter(filterset::Column::Keywords.eq(filters.keywords.as_str()));

    let mut rows = query
        .order_by_asc(filterset::Column::Id)
        .limit(2)
        .all(conn)
        .await?;

    if rows.len() > 1 {
        return Err(DomainError::IntegrityViolation(format!(
            "Multiple filter sets on board {} share the same criteria (ids {} and {})",
            board_id, rows[0].id, rows[1].id
        )));
    }
    Ok(rows.pop())
}

async fn find_by_name_with<C: ConnectionTrait>(
    conn: &C,
    board_id: i32,
    name: &str,
) -> DomainResult<Option<filterset::Model>> {
    Ok(filterset::Entity::find()
        .filter(filterset::Column::BoardId.eq(board_id))
        .filter(filterset::Column::Name.eq(name))
        .one(conn)
        .await?)
}

/// Turn tag titles into tag names, creating the tags that do not exist yet.
/// Runs inside the write transaction, so a rejected write leaves no tags behind.
async fn create_missing_tags<C: ConnectionTrait>(conn: &C, fs: &mut Filterset) -> DomainResult<()> {
    let mut names = Vec::with_capacity(fs.tags.len());
    for title in &fs.tags {
        let name = slugify(title);
        if name.is_empty() {
            continue;
        }
        let existing = tag::Entity::find()
            .filter(tag::Column::Name.eq(name.as_str()))
            .one(conn)
            .await?;
        if existing.is_none() {
            debug!("Creating tag {}", name);
            tag::ActiveModel {
                id: NotSet,
                name: Set(name.clone()),
                title: Set(title.trim().to_string()),
                created_at: Set(Utc::now()),
            }
            .insert(conn)
            .await?;
        }
        names.push(name);
    }
    fs.tags = names;
    Ok(())
}

/// Pre-write hook: normalise, validate and enforce both uniqueness rules.
async fn format_and_validate<C: ConnectionTrait>(
    conn: &C,
    fs: &mut Filterset,
) -> DomainResult<()> {
    fs.normalize();
    fs.validate()?;

    if let Some(existing) = find_by_name_with(conn, fs.board_id, &fs.name).await? {
        if existing.id != fs.id {
            return Err(DomainError::Conflict(format!(
                "A filter set named '{}' already exists on this board",
                fs.name
            )));
        }
    }

    if let Some(existing) = find_by_filters_with(conn, fs.board_id, &fs.to_filters()).await? {
        if existing.id != fs.id {
            return Err(DomainError::Conflict(DUPLICATE_CRITERIA_MESSAGE.to_string()));
        }
    }
    Ok(())
}

async fn write_associations<C: ConnectionTrait>(conn: &C, fs: &Filterset) -> DomainResult<()> {
    for assoc in &ASSOCIATIONS {
        let ids = assoc.resolve_ids(conn, assoc.filterset_names(fs)).await?;
        assoc.replace(conn, fs.id, &ids).await?;
    }
    Ok(())
}

// ── FiltersetRepository impl ────────────────────────────────────

#[async_trait]
impl FiltersetRepository for SeaOrmFiltersetRepository {
    async fn save(&self, mut fs: Filterset) -> DomainResult<Filterset> {
        debug!("Saving filter set {} on board {}", fs.name, fs.board_id);

        let txn = self.db.begin().await?;
        fs.id = 0;
        create_missing_tags(&txn, &mut fs).await?;
        format_and_validate(&txn, &mut fs).await?;

        let now = Utc::now();
        fs.created_at = now;
        fs.updated_at = now;

        let model = to_active(&fs).insert(&txn).await?;
        fs.id = model.id;
        write_associations(&txn, &fs).await?;

        let saved = load(&txn, model).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn update(&self, mut fs: Filterset) -> DomainResult<Filterset> {
        debug!("Updating filter set {} ({})", fs.name, fs.id);

        let txn = self.db.begin().await?;
        let existing = filterset::Entity::find_by_id(fs.id).one(&txn).await?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found("Filterset", "id", fs.id));
        };
        if existing.board_id != fs.board_id {
            return Err(DomainError::Validation(
                "A filter set cannot move between boards".into(),
            ));
        }

        create_missing_tags(&txn, &mut fs).await?;
        format_and_validate(&txn, &mut fs).await?;
        fs.created_at = existing.created_at;
        fs.updated_at = Utc::now();

        let model = to_active(&fs).update(&txn).await?;
        write_associations(&txn, &fs).await?;

        let updated = load(&txn, model).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn find_by_name(&self, board_id: i32, name: &str) -> DomainResult<Option<Filterset>> {
        match find_by_name_with(&self.db, board_id, name).await? {
            Some(m) => Ok(Some(load(&self.db, m).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_filters(
        &self,
        board_id: i32,
        filters: &FilterCriteria,
    ) -> DomainResult<Option<Filterset>> {
        match find_by_filters_with(&self.db, board_id, filters).await? {
            Some(m) => Ok(Some(load(&self.db, m).await?)),
            None => Ok(None),
        }
    }

    async fn find_all_for_board(&self, board_id: i32) -> DomainResult<Vec<Filterset>> {
        let models = filterset::Entity::find()
            .filter(filterset::Column::BoardId.eq(board_id))
            .order_by_asc(filterset::Column::Title)
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for m in models {
            out.push(load(&self.db, m).await?);
        }
        Ok(out)
    }

    async fn delete(&self, board_id: i32, name: &str) -> DomainResult<()> {
        debug!("Deleting filter set {} on board {}", name, board_id);

        let txn = self.db.begin().await?;
        let Some(existing) = find_by_name_with(&txn, board_id, name).await? else {
            return Err(DomainError::not_found("Filterset", "name", name));
        };

        for assoc in &ASSOCIATIONS {
            assoc.clear(&txn, existing.id).await?;
        }
        filterset::Entity::delete_by_id(existing.id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;
    use crate::domain::taxonomy::{TaxonomyItem, TaxonomyKind};
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::database::repositories::testing::{test_db, test_repos};
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn setup() -> (SeaOrmRepositoryProvider, i32, i32) {
        let repos = test_repos().await;
        let www = repos.boards().save(Board::new("www", "Jobs")).await.unwrap();
        let rust = repos
            .boards()
            .save(Board::new("rust", "Rust jobs"))
            .await
            .unwrap();

        for (kind, title) in [
            (TaxonomyKind::JobType, "Full-time"),
            (TaxonomyKind::JobType, "Contract"),
            (TaxonomyKind::JobCategory, "Programming"),
            (TaxonomyKind::JobCategory, "Design"),
            (TaxonomyKind::Tag, "Python"),
            (TaxonomyKind::Tag, "Machine Learning"),
            (TaxonomyKind::Tag, "Rust"),
            (TaxonomyKind::Domain, "example.com"),
        ] {
            repos
                .taxonomy()
                .save(TaxonomyItem::from_title(kind, title))
                .await
                .unwrap();
        }
        (repos, www.id, rust.id)
    }

    fn ml_bangalore(board_id: i32) -> Filterset {
        let mut fs = Filterset::new(board_id, "", "Machine learning jobs in Bangalore");
        fs.tags = vec!["python".into(), "machine-learning".into()];
        fs.geonameids = vec![1277333];
        fs
    }

    #[test]
    fn geonameids_text_roundtrip() {
        assert_eq!(geonameids_to_text(&[]), "[]");
        assert_eq!(geonameids_to_text(&[1, 22, 333]), "[1,22,333]");
        assert_eq!(geonameids_from_text("[1,22,333]").unwrap(), vec![1, 22, 333]);
        assert!(geonameids_from_text("not json").is_err());
    }

    #[tokio::test]
    async fn lookup_by_own_filters_returns_itself() {
        let (repos, www, _) = setup().await;
        let saved = repos.filtersets().save(ml_bangalore(www)).await.unwrap();

        let found = repos
            .filtersets()
            .find_by_filters(www, &saved.to_filters())
            .await
            .unwrap()
            .expect("filter set should match its own criteria");
        assert_eq!(found.id, saved.id);
        assert_eq!(found.tags, vec!["machine-learning", "python"]);
    }

    #[tokio::test]
    async fn geonameids_are_stored_sorted() {
        let (repos, www, _) = setup().await;
        let mut fs = Filterset::new(www, "metros", "Metros");
        fs.geonameids = vec![1277333, 1264527, 1273294];
        let saved = repos.filtersets().save(fs).await.unwrap();
        assert_eq!(saved.geonameids, vec![1264527, 1273294, 1277333]);

        let reloaded = repos
            .filtersets()
            .find_by_name(www, "metros")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.geonameids, vec![1264527, 1273294, 1277333]);

        // Input order of the lookup does not matter either
        let hit = repos
            .filtersets()
            .find_by_filters(
                www,
                &FilterCriteria {
                    geonameids: vec![1273294, 1277333, 1264527],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(hit.map(|f| f.id), Some(saved.id));
    }

    #[tokio::test]
    async fn duplicate_criteria_is_rejected() {
        let (repos, www, _) = setup().await;
        repos.filtersets().save(ml_bangalore(www)).await.unwrap();

        let mut dup = ml_bangalore(www);
        dup.name = "ml-blr".into();
        dup.title = "ML in Bangalore".into();
        dup.tags = vec!["machine-learning".into(), "python".into()];

        let err = repos.filtersets().save(dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == DUPLICATE_CRITERIA_MESSAGE));
        assert_eq!(repos.filtersets().find_all_for_board(www).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_criteria_on_another_board_is_allowed() {
        let (repos, www, rust) = setup().await;
        repos.filtersets().save(ml_bangalore(www)).await.unwrap();
        assert!(repos.filtersets().save(ml_bangalore(rust)).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let (repos, www, _) = setup().await;
        repos.filtersets().save(ml_bangalore(www)).await.unwrap();

        let mut other = ml_bangalore(www);
        other.tags = vec!["rust".into()];
        let err = repos.filtersets().save(other).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn subset_and_superset_do_not_match() {
        let (repos, www, _) = setup().await;
        let saved = repos.filtersets().save(ml_bangalore(www)).await.unwrap();

        let subset = FilterCriteria {
            tags: vec!["python".into()],
            geonameids: vec![1277333],
            ..Default::default()
        };
        assert!(repos.filtersets().find_by_filters(www, &subset).await.unwrap().is_none());

        let superset = FilterCriteria {
            tags: vec!["python".into(), "machine-learning".into(), "rust".into()],
            geonameids: vec![1277333],
            ..Default::default()
        };
        assert!(repos.filtersets().find_by_filters(www, &superset).await.unwrap().is_none());

        // A subset filter set can coexist with the superset one
        let mut python = Filterset::new(www, "python-bangalore", "Python in Bangalore");
        python.tags = vec!["python".into()];
        python.geonameids = vec![1277333];
        let python = repos.filtersets().save(python).await.unwrap();

        let hit = repos.filtersets().find_by_filters(www, &subset).await.unwrap();
        assert_eq!(hit.map(|f| f.id), Some(python.id));
        let hit = repos
            .filtersets()
            .find_by_filters(www, &saved.to_filters())
            .await
            .unwrap();
        assert_eq!(hit.map(|f| f.id), Some(saved.id));
    }

    #[tokio::test]
    async fn empty_filters_match_only_the_unconstrained_set() {
        let (repos, www, _) = setup().await;
        repos.filtersets().save(ml_bangalore(www)).await.unwrap();

        let mut remote = Filterset::new(www, "remote", "Remote");
        remote.remote_location = true;
        repos.filtersets().save(remote).await.unwrap();

        let empty = FilterCriteria::default();
        assert!(repos.filtersets().find_by_filters(www, &empty).await.unwrap().is_none());

        let all = repos
            .filtersets()
            .save(Filterset::new(www, "all", "All jobs"))
            .await
            .unwrap();
        let hit = repos.filtersets().find_by_filters(www, &empty).await.unwrap();
        assert_eq!(hit.map(|f| f.id), Some(all.id));
    }

    #[tokio::test]
    async fn scalar_criteria_are_exact() {
        let (repos, www, _) = setup().await;
        let mut fs = Filterset::new(www, "paid-equity", "Paid with equity");
        fs.pay_cash = Some(1_000_000);
        fs.pay_currency = Some("INR".into());
        fs.equity = true;
        fs.keywords = "backend".into();
        fs.types = vec!["full-time".into()];
        fs.categories = vec!["programming".into()];
        fs.domains = vec!["example.com".into()];
        let saved = repos.filtersets().save(fs).await.unwrap();

        let exact = saved.to_filters();
        assert!(repos.filtersets().find_by_filters(www, &exact).await.unwrap().is_some());

        let mut no_equity = exact.clone();
        no_equity.equity = false;
        assert!(repos.filtersets().find_by_filters(www, &no_equity).await.unwrap().is_none());

        let mut other_pay = exact.clone();
        other_pay.pay = Some(2_000_000);
        assert!(repos.filtersets().find_by_filters(www, &other_pay).await.unwrap().is_none());

        let mut pay_without_currency = exact.clone();
        pay_without_currency.currency = None;
        assert!(repos
            .filtersets()
            .find_by_filters(www, &pay_without_currency)
            .await
            .unwrap()
            .is_none());

        let mut no_keywords = exact.clone();
        no_keywords.keywords = String::new();
        assert!(repos.filtersets().find_by_filters(www, &no_keywords).await.unwrap().is_none());

        let mut no_domain = exact;
        no_domain.domains.clear();
        assert!(repos.filtersets().find_by_filters(www, &no_domain).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_rechecks_uniqueness() {
        let (repos, www, _) = setup().await;
        repos.filtersets().save(ml_bangalore(www)).await.unwrap();
        let mut rust = Filterset::new(www, "rust", "Rust");
        rust.tags = vec!["rust".into()];
        let rust = repos.filtersets().save(rust).await.unwrap();

        // Saving unchanged criteria is not a collision with itself
        let mut same = rust.clone();
        same.description = "All the Rust jobs".into();
        let updated = repos.filtersets().update(same).await.unwrap();
        assert_eq!(updated.description, "All the Rust jobs");
        assert_eq!(updated.tags, vec!["rust"]);

        // Turning it into a copy of the ML set is rejected
        let mut collide = updated.clone();
        collide.tags = vec!["python".into(), "machine-learning".into()];
        collide.geonameids = vec![1277333];
        let err = repos.filtersets().update(collide).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // and leaves the stored row untouched
        let stored = repos.filtersets().find_by_name(www, "rust").await.unwrap().unwrap();
        assert_eq!(stored.tags, vec!["rust"]);
        assert!(stored.geonameids.is_empty());
    }

    #[tokio::test]
    async fn unknown_item_names_are_not_found() {
        let (repos, www, _) = setup().await;
        let mut fs = Filterset::new(www, "mystery", "Mystery");
        fs.types = vec!["internship".into()];
        let err = repos.filtersets().save(fs).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "JobType", .. }));
        assert!(repos.filtersets().find_by_name(www, "mystery").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn distinct_sets_have_distinct_filters() {
        let (repos, www, _) = setup().await;
        repos.filtersets().save(ml_bangalore(www)).await.unwrap();
        let mut a = Filterset::new(www, "contract", "Contract");
        a.types = vec!["contract".into()];
        repos.filtersets().save(a).await.unwrap();
        let mut b = Filterset::new(www, "contract-design", "Contract design");
        b.types = vec!["contract".into()];
        b.categories = vec!["design".into()];
        repos.filtersets().save(b).await.unwrap();

        let all = repos.filtersets().find_all_for_board(www).await.unwrap();
        assert_eq!(all.len(), 3);
        for (i, x) in all.iter().enumerate() {
            for y in all.iter().skip(i + 1) {
                assert_ne!(x.to_filters(), y.to_filters());
            }
        }
    }

    #[tokio::test]
    async fn delete_removes_row_and_associations() {
        let (repos, www, _) = setup().await;
        let saved = repos.filtersets().save(ml_bangalore(www)).await.unwrap();
        repos.filtersets().delete(www, &saved.name).await.unwrap();

        assert!(repos.filtersets().find_by_name(www, &saved.name).await.unwrap().is_none());
        // The same criteria can be saved again
        assert!(repos.filtersets().save(ml_bangalore(www)).await.is_ok());

        let err = repos.filtersets().delete(www, "missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn several_matching_rows_are_an_integrity_violation() {
        let db = test_db().await;
        let repos = SeaOrmRepositoryProvider::new(db.clone());
        let www = repos.boards().save(Board::new("www", "Jobs")).await.unwrap();

        // Rows written around the repository skip the duplicate check
        for name in ["first", "second"] {
            filterset::ActiveModel {
                id: NotSet,
                board_id: Set(www.id),
                name: Set(name.into()),
                title: Set(name.into()),
                description: Set(String::new()),
                geonameids: Set("[]".into()),
                remote_location: Set(false),
                pay_currency: Set(None),
                pay_cash: Set(None),
                equity: Set(false),
                keywords: Set(String::new()),
                created_at: Set(Utc::now()),
                updated_at: Set(Utc::now()),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let err = repos
            .filtersets()
            .find_by_filters(www.id, &FilterCriteria::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IntegrityViolation(_)));
    }

    #[tokio::test]
    async fn tags_are_created_from_titles() {
        let (repos, www, _) = setup().await;
        let mut fs = Filterset::new(www, "", "Async jobs");
        fs.tags = vec!["Async Rust".into(), "rust".into()];
        let saved = repos.filtersets().save(fs).await.unwrap();
        assert_eq!(saved.tags, vec!["async-rust", "rust"]);

        let created = repos
            .taxonomy()
            .find_by_name(TaxonomyKind::Tag, "async-rust")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.title, "Async Rust");
    }

    #[tokio::test]
    async fn rejected_write_creates_no_tags() {
        let (repos, www, _) = setup().await;
        let saved = repos.filtersets().save(ml_bangalore(www)).await.unwrap();

        let mut clash = Filterset::new(www, saved.name.as_str(), "Deep learning");
        clash.tags = vec!["Deep Learning".into()];
        let err = repos.filtersets().save(clash).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let tag = repos
            .taxonomy()
            .find_by_name(TaxonomyKind::Tag, "deep-learning")
            .await
            .unwrap();
        assert!(tag.is_none());
    }
}
