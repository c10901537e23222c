use chrono::{DateTime, Utc};

use serde::Serialize;

use uuid::Uuid;

use crate::domain::{MonthYear, Price, ServiceName, UserId};

/// Validated create/update request. Updates replace every field.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub service_name: ServiceName,
    pub price: Price,
    pub user_id: UserId,
    pub start_date: MonthYear,
}

/// Stored Subscription record
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Subscription {
    /// ID of the subscription, assigned by the database
    pub id: i32,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    /// First instant of the subscription's starting month
    pub start_date: DateTime<Utc>,
}

/// Optional constraints for the aggregate endpoint.
/// `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionFilter {
    /// Compared exactly, whitespace included
    pub service_name: Option<String>,
    pub user_id: Option<UserId>,
    /// Inclusive lower bound on the start date
    pub start_date: Option<MonthYear>,
    /// Inclusive upper bound on the start date
    pub end_date: Option<MonthYear>,
}

/// Aggregate price over a filtered set of subscriptions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalStats {
    pub total: i64,
}
