/// HTTP-facing errors
pub mod error;
/// Subscription CRUD and aggregate endpoints
pub mod subscriptions;
