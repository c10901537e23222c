use std::sync::Mutex;

use chrono::{DateTime, Utc};

use uuid::Uuid;

use crate::domain::SubscriptionId;
use crate::error::{Error, Result};
use crate::model::{NewSubscription, Subscription, SubscriptionFilter};

use super::SubscriptionRepo;

/// Vector-backed repository for exercising services and controllers without Postgres
#[derive(Debug, Default)]
pub struct InMemorySubscriptionRepo {
    rows: Mutex<Vec<Subscription>>,
}

/// Same semantics as the SQL predicates: absent filters match everything, date bounds are inclusive
fn matches(filter: &SubscriptionFilter, row: &Subscription) -> bool {
    let service_matches = filter
        .service_name
        .as_ref()
        .map_or(true, |name| name.as_str() == row.service_name);
    let user_matches = filter
        .user_id
        .map_or(true, |id| Uuid::from(id) == row.user_id);
    let after_start = filter
        .start_date
        .map_or(true, |start| row.start_date >= *start.as_ref());
    let before_end = filter
        .end_date
        .map_or(true, |end| row.start_date <= *end.as_ref());

    service_matches && user_matches && after_start && before_end
}

fn to_row(id: i32, subscription: &NewSubscription) -> Subscription {
    Subscription {
        id,
        service_name: subscription.service_name.as_str().to_string(),
        price: subscription.price.into(),
        user_id: Uuid::from(subscription.user_id),
        start_date: DateTime::<Utc>::from(subscription.start_date),
    }
}

#[async_trait::async_trait]
impl SubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, new_subscription: &NewSubscription) -> Result<Subscription> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let row = to_row(id, new_subscription);
        rows.push(row.clone());
        Ok(row)
    }

    async fn fetch_by_id(&self, id: SubscriptionId) -> Result<Subscription> {
        let id = i32::from(id);
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(Error::RecordNotFound)
    }

    async fn fetch_page(&self, offset: i64, limit: i64) -> Result<Vec<Subscription>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_by_filter(&self, filter: &SubscriptionFilter) -> Result<Vec<Subscription>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| matches(filter, row))
            .cloned()
            .collect())
    }

    async fn update_by_id(
        &self,
        id: SubscriptionId,
        subscription: &NewSubscription,
    ) -> Result<Subscription> {
        let id = i32::from(id);
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(Error::RecordNotFound)?;
        *row = to_row(id, subscription);
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: SubscriptionId) -> Result<Subscription> {
        let id = i32::from(id);
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(Error::RecordNotFound)?;
        Ok(rows.remove(index))
    }
}

/// Repository whose every statement fails like a lost database connection
#[derive(Debug, Default)]
pub struct UnavailableSubscriptionRepo;

#[async_trait::async_trait]
impl SubscriptionRepo for UnavailableSubscriptionRepo {
    async fn insert(&self, _: &NewSubscription) -> Result<Subscription> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn fetch_by_id(&self, _: SubscriptionId) -> Result<Subscription> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn fetch_page(&self, _: i64, _: i64) -> Result<Vec<Subscription>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn fetch_by_filter(&self, _: &SubscriptionFilter) -> Result<Vec<Subscription>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update_by_id(&self, _: SubscriptionId, _: &NewSubscription) -> Result<Subscription> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete_by_id(&self, _: SubscriptionId) -> Result<Subscription> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
