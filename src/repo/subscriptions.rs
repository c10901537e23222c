use chrono::{DateTime, Utc};

use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};

use uuid::Uuid;

use crate::domain::SubscriptionId;
use crate::error::{Error, Result};
use crate::model::{NewSubscription, Subscription, SubscriptionFilter};

const SELECT_SUBSCRIPTIONS: &str =
    "select id, service_name, price, user_id, start_date from subscriptions";

/// Subscription repository trait, must be implemented for each storage backend.
/// NOTE: Missing rows are reported as `Error::RecordNotFound`, never as a driver error
#[async_trait::async_trait]
pub trait SubscriptionRepo: Send + Sync {
    /// Insert a new subscription, returning the stored row
    async fn insert(&self, new_subscription: &NewSubscription) -> Result<Subscription>;

    /// Fetch a single subscription by database ID
    async fn fetch_by_id(&self, id: SubscriptionId) -> Result<Subscription>;

    /// Fetch a bounded range of subscriptions in ID order
    async fn fetch_page(&self, offset: i64, limit: i64) -> Result<Vec<Subscription>>;

    /// Fetch every subscription matching the filter
    async fn fetch_by_filter(&self, filter: &SubscriptionFilter) -> Result<Vec<Subscription>>;

    /// Replace all fields of an existing subscription
    async fn update_by_id(
        &self,
        id: SubscriptionId,
        subscription: &NewSubscription,
    ) -> Result<Subscription>;

    /// Delete a subscription, returning the row as it was before deletion
    async fn delete_by_id(&self, id: SubscriptionId) -> Result<Subscription>;
}

/// Postgres Subscription Repository
#[derive(Debug, Clone)]
pub struct PgSubscriptionRepo {
    pool: PgPool,
}

impl PgSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubscriptionRepo for PgSubscriptionRepo {
    #[tracing::instrument(name = "Insert subscription", skip(self))]
    async fn insert(&self, new_subscription: &NewSubscription) -> Result<Subscription> {
        let subscription = sqlx::query_as::<_, Subscription>(
            "insert into subscriptions(service_name, price, user_id, start_date) \
             values ($1, $2, $3, $4) \
             returning id, service_name, price, user_id, start_date",
        )
        .bind(new_subscription.service_name.as_str())
        .bind(i32::from(new_subscription.price))
        .bind(Uuid::from(new_subscription.user_id))
        .bind(DateTime::<Utc>::from(new_subscription.start_date))
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    #[tracing::instrument(name = "Fetch subscription by id", skip(self))]
    async fn fetch_by_id(&self, id: SubscriptionId) -> Result<Subscription> {
        sqlx::query_as::<_, Subscription>(&format!("{} where id = $1", SELECT_SUBSCRIPTIONS))
            .bind(i32::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::RecordNotFound)
    }

    #[tracing::instrument(name = "Fetch a page of subscriptions", skip(self))]
    async fn fetch_page(&self, offset: i64, limit: i64) -> Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(&format!(
            "{} order by id offset $1 limit $2",
            SELECT_SUBSCRIPTIONS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }

    #[tracing::instrument(name = "Fetch subscriptions by filter", skip(self))]
    async fn fetch_by_filter(&self, filter: &SubscriptionFilter) -> Result<Vec<Subscription>> {
        let mut query = filtered_query(filter);
        let subscriptions = query
            .build_query_as::<Subscription>()
            .fetch_all(&self.pool)
            .await?;

        Ok(subscriptions)
    }

    #[tracing::instrument(name = "Update subscription by id", skip(self))]
    async fn update_by_id(
        &self,
        id: SubscriptionId,
        subscription: &NewSubscription,
    ) -> Result<Subscription> {
        sqlx::query_as::<_, Subscription>(
            "update subscriptions \
             set service_name=$2, price=$3, user_id=$4, start_date=$5 \
             where id=$1 \
             returning id, service_name, price, user_id, start_date",
        )
        .bind(i32::from(id))
        .bind(subscription.service_name.as_str())
        .bind(i32::from(subscription.price))
        .bind(Uuid::from(subscription.user_id))
        .bind(DateTime::<Utc>::from(subscription.start_date))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::RecordNotFound)
    }

    #[tracing::instrument(name = "Delete subscription by id", skip(self))]
    async fn delete_by_id(&self, id: SubscriptionId) -> Result<Subscription> {
        sqlx::query_as::<_, Subscription>(
            "delete from subscriptions where id=$1 \
             returning id, service_name, price, user_id, start_date",
        )
        .bind(i32::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::RecordNotFound)
    }
}

/// Appends `where`/`and` joined predicates, each carrying exactly one bound parameter
struct Predicates<'q, 'args> {
    query: &'q mut QueryBuilder<'args, Postgres>,
    empty: bool,
}

impl<'q, 'args> Predicates<'q, 'args> {
    fn new(query: &'q mut QueryBuilder<'args, Postgres>) -> Self {
        Self { query, empty: true }
    }

    fn push<T>(&mut self, clause: &str, value: T)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.query.push(if self.empty { " where " } else { " and " });
        self.query.push(clause).push_bind(value);
        self.empty = false;
    }
}

/// Build the aggregate query. Absent filters add neither a clause nor a parameter.
fn filtered_query(filter: &SubscriptionFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(SELECT_SUBSCRIPTIONS);

    let mut predicates = Predicates::new(&mut query);
    if let Some(service_name) = &filter.service_name {
        predicates.push("service_name = ", service_name.as_str());
    }
    if let Some(user_id) = filter.user_id {
        predicates.push("user_id = ", Uuid::from(user_id));
    }
    if let Some(start_date) = filter.start_date {
        predicates.push("start_date >= ", DateTime::<Utc>::from(start_date));
    }
    if let Some(end_date) = filter.end_date {
        predicates.push("start_date <= ", DateTime::<Utc>::from(end_date));
    }

    query.push(" order by id");
    query
}
