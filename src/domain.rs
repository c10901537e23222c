mod month_year;
mod pagination;
mod price;
mod service_name;
mod subscription_id;
mod user_id;

pub use month_year::MonthYear;
pub use pagination::Pagination;
pub use price::Price;
pub use service_name::ServiceName;
pub use subscription_id::SubscriptionId;
pub use user_id::UserId;
