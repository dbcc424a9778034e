//! SeaORM implementation of JobPostRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::filterset::FilterCriteria;
use crate::domain::job_post::model::generate_hashid;
use crate::domain::job_post::{JobPost, JobPostRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{
    domain, job_category, job_post, job_post_location, job_post_tag, job_type, tag,
};

/// Attempts at drawing an unused hashid before giving up
const HASHID_ATTEMPTS: usize = 5;

pub struct SeaOrmJobPostRepository {
    db: DatabaseConnection,
}

impl SeaOrmJobPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn type_id<C: ConnectionTrait>(conn: &C, name: &str) -> DomainResult<i32> {
    job_type::Entity::find()
        .filter(job_type::Column::Name.eq(name))
        .one(conn)
        .await?
        .map(|m| m.id)
        .ok_or_else(|| DomainError::not_found("JobType", "name", name))
}

async fn category_id<C: ConnectionTrait>(conn: &C, name: &str) -> DomainResult<i32> {
    job_category::Entity::find()
        .filter(job_category::Column::Name.eq(name))
        .one(conn)
        .await?
        .map(|m| m.id)
        .ok_or_else(|| DomainError::not_found("JobCategory", "name", name))
}

async fn domain_id<C: ConnectionTrait>(conn: &C, name: &str) -> DomainResult<i32> {
    domain::Entity::find()
        .filter(domain::Column::Name.eq(name))
        .one(conn)
        .await?
        .map(|m| m.id)
        .ok_or_else(|| DomainError::not_found("Domain", "name", name))
}

async fn tag_ids<C: ConnectionTrait>(conn: &C, names: &[String]) -> DomainResult<Vec<i32>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let found = tag::Entity::find()
        .filter(tag::Column::Name.is_in(names.iter().cloned()))
        .all(conn)
        .await?;
    names
        .iter()
        .map(|name| {
            found
                .iter()
                .find(|t| &t.name == name)
                .map(|t| t.id)
                .ok_or_else(|| DomainError::not_found("Tag", "name", name))
        })
        .collect()
}

async fn unused_hashid<C: ConnectionTrait>(conn: &C, preferred: &str) -> DomainResult<String> {
    let mut candidate = preferred.to_string();
    for _ in 0..HASHID_ATTEMPTS {
        let taken = job_post::Entity::find()
            .filter(job_post::Column::Hashid.eq(candidate.as_str()))
            .one(conn)
            .await?
            .is_some();
        if !taken {
            return Ok(candidate);
        }
        warn!("Hashid {} already taken, drawing another", candidate);
        candidate = generate_hashid();
    }
    Err(DomainError::Database(
        "Could not allocate a unique job identifier".into(),
    ))
}

async fn load<C: ConnectionTrait>(conn: &C, m: job_post::Model) -> DomainResult<JobPost> {
    let job_type = job_type::Entity::find_by_id(m.jobtype_id)
        .one(conn)
        .await?
        .map(|t| t.name)
        .unwrap_or_default();
    let job_category = job_category::Entity::find_by_id(m.jobcategory_id)
        .one(conn)
        .await?
        .map(|c| c.name)
        .unwrap_or_default();
    let domain = match m.domain_id {
        Some(id) => domain::Entity::find_by_id(id).one(conn).await?.map(|d| d.name),
        None => None,
    };

    let tag_rows = job_post_tag::Entity::find()
        .filter(job_post_tag::Column::JobpostId.eq(m.id))
        .all(conn)
        .await?;
    let tags = if tag_rows.is_empty() {
        Vec::new()
    } else {
        tag::Entity::find()
            .filter(tag::Column::Id.is_in(tag_rows.iter().map(|r| r.tag_id)))
            .order_by_asc(tag::Column::Name)
            .all(conn)
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect()
    };

    let geonameids = job_post_location::Entity::find()
        .filter(job_post_location::Column::JobpostId.eq(m.id))
        .order_by_asc(job_post_location::Column::Geonameid)
        .all(conn)
        .await?
        .into_iter()
        .map(|l| l.geonameid)
        .collect();

    Ok(JobPost {
        id: m.id,
        hashid: m.hashid,
        board_id: m.board_id,
        headline: m.headline,
        description: m.description,
        job_type,
        job_category,
        tags,
        domain,
        geonameids,
        remote_location: m.remote_location,
        pay_currency: m.pay_currency,
        pay_cash_min: m.pay_cash_min,
        pay_cash_max: m.pay_cash_max,
        equity: m.equity,
        datetime: m.datetime,
    })
}

/// Match-any listing condition for a set of filters
fn listing_condition(filters: &FilterCriteria) -> Condition {
    let mut cond = Condition::all();

    if !filters.types.is_empty() {
        cond = cond.add(
            job_post::Column::JobtypeId.in_subquery(
                Query::select()
                    .column(job_type::Column::Id)
                    .from(job_type::Entity)
                    .and_where(job_type::Column::Name.is_in(filters.types.iter().cloned()))
                    .to_owned(),
            ),
        );
    }

    if !filters.categories.is_empty() {
        cond = cond.add(
            job_post::Column::JobcategoryId.in_subquery(
                Query::select()
                    .column(job_category::Column::Id)
                    .from(job_category::Entity)
                    .and_where(
                        job_category::Column::Name.is_in(filters.categories.iter().cloned()),
                    )
                    .to_owned(),
            ),
        );
    }

    if !filters.domains.is_empty() {
        cond = cond.add(
            job_post::Column::DomainId.in_subquery(
                Query::select()
                    .column(domain::Column::Id)
                    .from(domain::Entity)
                    .and_where(domain::Column::Name.is_in(filters.domains.iter().cloned()))
                    .to_owned(),
            ),
        );
    }

    if !filters.tags.is_empty() {
        cond = cond.add(
            job_post::Column::Id.in_subquery(
                Query::select()
                    .column((job_post_tag::Entity, job_post_tag::Column::JobpostId))
                    .from(job_post_tag::Entity)
                    .inner_join(
                        tag::Entity,
                        Expr::col((tag::Entity, tag::Column::Id))
                            .equals((job_post_tag::Entity, job_post_tag::Column::TagId)),
                    )
                    .and_where(
                        Expr::col((tag::Entity, tag::Column::Name))
                            .is_in(filters.tags.iter().cloned()),
                    )
                    .to_owned(),
            ),
        );
    }

    // Locations: any overlapping geoname, or remote when `anywhere` is set
    let mut location = Condition::any();
    if !filters.geonameids.is_empty() {
        location = location.add(
            job_post::Column::Id.in_subquery(
                Query::select()
                    .column(job_post_location::Column::JobpostId)
                    .from(job_post_location::Entity)
                    .and_where(
                        job_post_location::Column::Geonameid
                            .is_in(filters.geonameids.iter().copied()),
                    )
                    .to_owned(),
            ),
        );
    }
    if filters.anywhere {
        location = location.add(job_post::Column::RemoteLocation.eq(true));
    }
    if !location.is_empty() {
        cond = cond.add(location);
    }

    if let Some((pay, currency)) = filters.pay_filter() {
        cond = cond
            .add(job_post::Column::PayCurrency.eq(currency))
            .add(job_post::Column::PayCashMin.lte(pay))
            .add(job_post::Column::PayCashMax.gte(pay));
    }

    if filters.equity {
        cond = cond.add(job_post::Column::Equity.eq(true));
    }

    if !filters.keywords.is_empty() {
        cond = cond.add(
            Condition::any()
                .add(job_post::Column::Headline.contains(filters.keywords.as_str()))
                .add(job_post::Column::Description.contains(filters.keywords.as_str())),
        );
    }

    cond
}

#[async_trait]
impl JobPostRepository for SeaOrmJobPostRepository {
    async fn save(&self, mut job: JobPost) -> DomainResult<JobPost> {
        job.normalize();
        job.validate()?;
        debug!("Saving job post '{}' on board {}", job.headline, job.board_id);

        let txn = self.db.begin().await?;

        let jobtype_id = type_id(&txn, &job.job_type).await?;
        let jobcategory_id = category_id(&txn, &job.job_category).await?;
        let domain_id = match job.domain.as_deref() {
            Some(name) => Some(domain_id(&txn, name).await?),
            None => None,
        };
        let tag_ids = tag_ids(&txn, &job.tags).await?;
        let hashid = unused_hashid(&txn, &job.hashid).await?;

        let model = job_post::ActiveModel {
            id: NotSet,
            hashid: Set(hashid),
            board_id: Set(job.board_id),
            headline: Set(job.headline.clone()),
            description: Set(job.description.clone()),
            jobtype_id: Set(jobtype_id),
            jobcategory_id: Set(jobcategory_id),
            domain_id: Set(domain_id),
            remote_location: Set(job.remote_location),
            pay_currency: Set(job.pay_currency.clone()),
            pay_cash_min: Set(job.pay_cash_min),
            pay_cash_max: Set(job.pay_cash_max),
            equity: Set(job.equity),
            datetime: Set(job.datetime),
        }
        .insert(&txn)
        .await?;

        if !tag_ids.is_empty() {
            let now = Utc::now();
            let rows = tag_ids.iter().map(|tag_id| job_post_tag::ActiveModel {
                jobpost_id: Set(model.id),
                tag_id: Set(*tag_id),
                created_at: Set(now),
            });
            job_post_tag::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        if !job.geonameids.is_empty() {
            let rows = job.geonameids.iter().map(|geonameid| job_post_location::ActiveModel {
                jobpost_id: Set(model.id),
                geonameid: Set(*geonameid),
            });
            job_post_location::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        let saved = load(&txn, model).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn find_by_hashid(&self, hashid: &str) -> DomainResult<Option<JobPost>> {
        let model = job_post::Entity::find()
            .filter(job_post::Column::Hashid.eq(hashid))
            .one(&self.db)
            .await?;
        match model {
            Some(m) => Ok(Some(load(&self.db, m).await?)),
            None => Ok(None),
        }
    }

    async fn find_for_board(
        &self,
        board_id: i32,
        filters: &FilterCriteria,
        limit: u64,
    ) -> DomainResult<Vec<JobPost>> {
        let filters = filters.normalized();
        let models = job_post::Entity::find()
            .filter(job_post::Column::BoardId.eq(board_id))
            .filter(listing_condition(&filters))
            .order_by_desc(job_post::Column::Datetime)
            .order_by_desc(job_post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for m in models {
            out.push(load(&self.db, m).await?);
        }
        Ok(out)
    }
}
