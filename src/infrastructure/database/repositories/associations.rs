//! Query builders for the filterset association tables
//!
//! The four `filterset_<item>` tables share one layout, so they are
//! addressed by name rather than through four copies of typed code.

use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr, Func, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DbErr};

use crate::domain::taxonomy::TaxonomyKind;
use crate::domain::{DomainError, DomainResult, FilterCriteria, Filterset};

const FILTERSET_ID: &str = "filterset_id";

/// One `filterset_<item>` association table
#[derive(Debug, Clone, Copy)]
pub struct Association {
    pub kind: TaxonomyKind,
    pub table: &'static str,
    pub item_table: &'static str,
    pub item_column: &'static str,
}

pub const ASSOCIATIONS: [Association; 4] = [
    Association {
        kind: TaxonomyKind::JobType,
        table: "filterset_jobtype",
        item_table: "jobtype",
        item_column: "jobtype_id",
    },
    Association {
        kind: TaxonomyKind::JobCategory,
        table: "filterset_jobcategory",
        item_table: "jobcategory",
        item_column: "jobcategory_id",
    },
    Association {
        kind: TaxonomyKind::Tag,
        table: "filterset_tag",
        item_table: "tag",
        item_column: "tag_id",
    },
    Association {
        kind: TaxonomyKind::Domain,
        table: "filterset_domain",
        item_table: "domain",
        item_column: "domain_id",
    },
];

impl Association {
    /// The names of this kind in a criteria dictionary
    pub fn criteria_names<'a>(&self, filters: &'a FilterCriteria) -> &'a [String] {
        match self.kind {
            TaxonomyKind::JobType => &filters.types,
            TaxonomyKind::JobCategory => &filters.categories,
            TaxonomyKind::Tag => &filters.tags,
            TaxonomyKind::Domain => &filters.domains,
        }
    }

    /// The names of this kind held by a filter set
    pub fn filterset_names<'a>(&self, filterset: &'a Filterset) -> &'a [String] {
        match self.kind {
            TaxonomyKind::JobType => &filterset.types,
            TaxonomyKind::JobCategory => &filterset.categories,
            TaxonomyKind::Tag => &filterset.tags,
            TaxonomyKind::Domain => &filterset.domains,
        }
    }

    fn table(&self) -> Alias {
        Alias::new(self.table)
    }

    fn item_table(&self) -> Alias {
        Alias::new(self.item_table)
    }

    fn filterset_col(&self) -> (Alias, Alias) {
        (self.table(), Alias::new(FILTERSET_ID))
    }

    fn item_col(&self) -> (Alias, Alias) {
        (self.table(), Alias::new(self.item_column))
    }

    /// `SELECT filterset_id FROM <table>`: every filter set with at least
    /// one association of this kind.
    pub fn any_association(&self) -> SelectStatement {
        Query::select()
            .column(self.filterset_col())
            .from(self.table())
            .to_owned()
    }

    /// Filter sets associated with all of `names` (which must be distinct).
    pub fn associated_with_all(&self, names: &[String]) -> SelectStatement {
        Query::select()
            .column(self.filterset_col())
            .from(self.table())
            .inner_join(
                self.item_table(),
                Expr::col((self.item_table(), Alias::new("id"))).equals(self.item_col()),
            )
            .and_where(
                Expr::col((self.item_table(), Alias::new("name"))).is_in(names.iter().cloned()),
            )
            .group_by_col(self.filterset_col())
            .and_having(Expr::expr(Func::count(Expr::col(self.filterset_col()))).eq(names.len() as i64))
            .to_owned()
    }

    /// Filter sets with exactly `count` associations of this kind.
    pub fn association_count(&self, count: usize) -> SelectStatement {
        Query::select()
            .column(self.filterset_col())
            .from(self.table())
            .group_by_col(self.filterset_col())
            .and_having(Expr::expr(Func::count(Expr::col(self.filterset_col()))).eq(count as i64))
            .to_owned()
    }

    /// Names associated with one filter set, sorted
    pub async fn load_names<C: ConnectionTrait>(
        &self,
        conn: &C,
        filterset_id: i32,
    ) -> Result<Vec<String>, DbErr> {
        let stmt = Query::select()
            .column((self.item_table(), Alias::new("name")))
            .from(self.table())
            .inner_join(
                self.item_table(),
                Expr::col((self.item_table(), Alias::new("id"))).equals(self.item_col()),
            )
            .and_where(Expr::col(self.filterset_col()).eq(filterset_id))
            .order_by((self.item_table(), Alias::new("name")), Order::Asc)
            .to_owned();

        let backend = conn.get_database_backend();
        let rows = conn.query_all(backend.build(&stmt)).await?;
        rows.iter()
            .map(|row| row.try_get::<String>("", "name"))
            .collect()
    }

    /// Resolve names to item ids. Every name must exist.
    pub async fn resolve_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> DomainResult<Vec<i32>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let stmt = Query::select()
            .columns([Alias::new("id"), Alias::new("name")])
            .from(self.item_table())
            .and_where(Expr::col(Alias::new("name")).is_in(names.iter().cloned()))
            .to_owned();

        let backend = conn.get_database_backend();
        let rows = conn.query_all(backend.build(&stmt)).await?;

        let mut found = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i32 = row.try_get("", "id")?;
            let name: String = row.try_get("", "name")?;
            found.push((name, id));
        }

        names
            .iter()
            .map(|name| {
                found
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, id)| *id)
                    .ok_or_else(|| DomainError::not_found(self.kind.entity_name(), "name", name))
            })
            .collect()
    }

    /// Replace the associations of one filter set
    pub async fn replace<C: ConnectionTrait>(
        &self,
        conn: &C,
        filterset_id: i32,
        item_ids: &[i32],
    ) -> DomainResult<()> {
        self.clear(conn, filterset_id).await?;
        if item_ids.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut insert = Query::insert();
        insert.into_table(self.table()).columns([
            Alias::new(FILTERSET_ID),
            Alias::new(self.item_column),
            Alias::new("created_at"),
        ]);
        for item_id in item_ids {
            insert
                .values([filterset_id.into(), (*item_id).into(), now.into()])
                .map_err(|e| DomainError::Database(e.to_string()))?;
        }

        let backend = conn.get_database_backend();
        conn.execute(backend.build(&insert)).await?;
        Ok(())
    }

    /// Remove all associations of one filter set
    pub async fn clear<C: ConnectionTrait>(&self, conn: &C, filterset_id: i32) -> DomainResult<()> {
        let stmt = Query::delete()
            .from_table(self.table())
            .and_where(Expr::col(Alias::new(FILTERSET_ID)).eq(filterset_id))
            .to_owned();
        let backend = conn.get_database_backend();
        conn.execute(backend.build(&stmt)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::SqliteQueryBuilder;

    #[test]
    fn associated_with_all_counts_matching_names() {
        let names = vec!["contract".to_string(), "fulltime".to_string()];
        let sql = ASSOCIATIONS[0]
            .associated_with_all(&names)
            .to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#"FROM "filterset_jobtype""#), "{}", sql);
        assert!(sql.contains(r#"INNER JOIN "jobtype""#), "{}", sql);
        assert!(sql.contains(r#""jobtype"."name" IN ('contract', 'fulltime')"#), "{}", sql);
        assert!(sql.contains("HAVING COUNT("), "{}", sql);
        assert!(sql.ends_with("= 2"), "{}", sql);
    }

    #[test]
    fn criteria_names_follow_kind() {
        let filters = FilterCriteria {
            types: vec!["a".into()],
            categories: vec!["b".into()],
            tags: vec!["c".into()],
            domains: vec!["d.com".into()],
            ..Default::default()
        };
        let picked: Vec<&str> = ASSOCIATIONS
            .iter()
            .map(|a| a.criteria_names(&filters)[0].as_str())
            .collect();
        assert_eq!(picked, vec!["a", "b", "c", "d.com"]);
    }
}
