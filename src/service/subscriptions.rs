use std::sync::Arc;

use crate::domain::{Pagination, SubscriptionId};
use crate::error::Result;
use crate::model::{NewSubscription, Subscription, SubscriptionFilter, TotalStats};
use crate::repo::SubscriptionRepo;

/// Subscription use-cases, shared between request handlers
#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepo>,
}

impl SubscriptionService {
    pub fn new(repo: impl SubscriptionRepo + 'static) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    pub async fn create(&self, new_subscription: &NewSubscription) -> Result<Subscription> {
        self.repo.insert(new_subscription).await
    }

    pub async fn fetch(&self, id: SubscriptionId) -> Result<Subscription> {
        self.repo.fetch_by_id(id).await
    }

    /// Fetch a page of subscriptions; pages past the end are empty
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<Subscription>> {
        self.repo
            .fetch_page(pagination.offset(), pagination.limit())
            .await
    }

    pub async fn update(
        &self,
        id: SubscriptionId,
        subscription: &NewSubscription,
    ) -> Result<Subscription> {
        self.repo.update_by_id(id, subscription).await
    }

    pub async fn delete(&self, id: SubscriptionId) -> Result<Subscription> {
        self.repo.delete_by_id(id).await
    }

    /// Sum the prices of every subscription matching the filter
    pub async fn total(&self, filter: &SubscriptionFilter) -> Result<TotalStats> {
        let total = self
            .repo
            .fetch_by_filter(filter)
            .await?
            .iter()
            .map(|subscription| i64::from(subscription.price))
            .sum();

        Ok(TotalStats { total })
    }
}
