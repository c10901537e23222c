use actix_web::dev::HttpServiceFactory;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{delete, get, post, put, web, HttpResponse};

use serde::{Deserialize, Serialize};

use crate::domain::{Pagination, SubscriptionId};
use crate::error::Error;
use crate::model::{NewSubscription, SubscriptionFilter};
use crate::service::SubscriptionService;

use super::error::{json_error_handler, query_error_handler, RestResult};

/// JSON body for creating or replacing a subscription
#[derive(Debug, Deserialize)]
pub struct SubscriptionBody {
    service_name: String,
    price: i64,
    user_id: String,
    /// `MM-YYYY`
    start_date: String,
}

impl TryFrom<SubscriptionBody> for NewSubscription {
    type Error = Error;

    fn try_from(body: SubscriptionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            service_name: body.service_name.parse()?,
            price: body.price.try_into()?,
            user_id: body.user_id.parse()?,
            start_date: body.start_date.parse()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    page: Option<String>,
    count: Option<String>,
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = Error;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        Pagination::parse(query.page.as_deref(), query.count.as_deref())
    }
}

/// Optional filters for the aggregate endpoint. Empty values count as absent.
#[derive(Debug, Deserialize)]
pub struct TotalQuery {
    user_id: Option<String>,
    service_name: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl TryFrom<TotalQuery> for SubscriptionFilter {
    type Error = Error;

    fn try_from(query: TotalQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            service_name: query.service_name.filter(|v| !v.is_empty()),
            user_id: parse_optional(query.user_id)?,
            start_date: parse_optional(query.start_date)?,
            end_date: parse_optional(query.end_date)?,
        })
    }
}

fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, Error>
where
    T: std::str::FromStr<Err = Error>,
{
    value
        .filter(|v| !v.is_empty())
        .map(|v| v.parse())
        .transpose()
}

/// Serialize before building the response, so encoding failures still become a clean 500
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> RestResult<HttpResponse> {
    let body = serde_json::to_vec(value).map_err(Error::from)?;

    Ok(HttpResponse::build(status)
        .content_type(ContentType::json())
        .body(body))
}

/// Create endpoint for new subscriptions
#[tracing::instrument(name = "Create a subscription", skip(service))]
#[post("")]
async fn create(
    service: web::Data<SubscriptionService>,
    body: web::Json<SubscriptionBody>,
) -> RestResult<HttpResponse> {
    let new_subscription: NewSubscription = body.into_inner().try_into()?;

    let subscription = service.create(&new_subscription).await?;

    json_response(StatusCode::CREATED, &subscription)
}

/// Paginated listing, `?page=1&count=10`
#[tracing::instrument(name = "List subscriptions", skip(service))]
#[get("")]
async fn list(
    service: web::Data<SubscriptionService>,
    query: web::Query<PaginationQuery>,
) -> RestResult<HttpResponse> {
    let pagination: Pagination = query.into_inner().try_into()?;

    let subscriptions = service.list(pagination).await?;

    json_response(StatusCode::OK, &subscriptions)
}

/// Sum of prices over the filtered subscriptions
#[tracing::instrument(name = "Total subscription price", skip(service))]
#[get("/total")]
async fn total(
    service: web::Data<SubscriptionService>,
    query: web::Query<TotalQuery>,
) -> RestResult<HttpResponse> {
    let filter: SubscriptionFilter = query.into_inner().try_into()?;

    let stats = service.total(&filter).await?;

    json_response(StatusCode::OK, &stats)
}

#[tracing::instrument(name = "Fetch a subscription", skip(service))]
#[get("/{id}")]
async fn fetch(
    service: web::Data<SubscriptionService>,
    path: web::Path<(String,)>,
) -> RestResult<HttpResponse> {
    let (id,) = path.into_inner();
    let id: SubscriptionId = id.parse()?;

    let subscription = service.fetch(id).await?;

    json_response(StatusCode::OK, &subscription)
}

/// Full replace of an existing subscription
#[tracing::instrument(name = "Update a subscription", skip(service))]
#[put("/{id}")]
async fn update(
    service: web::Data<SubscriptionService>,
    path: web::Path<(String,)>,
    body: web::Json<SubscriptionBody>,
) -> RestResult<HttpResponse> {
    let (id,) = path.into_inner();
    let id: SubscriptionId = id.parse()?;
    let subscription: NewSubscription = body.into_inner().try_into()?;

    let subscription = service.update(id, &subscription).await?;

    json_response(StatusCode::OK, &subscription)
}

/// Delete a subscription, responding with the removed record
#[tracing::instrument(name = "Delete a subscription", skip(service))]
#[delete("/{id}")]
async fn remove(
    service: web::Data<SubscriptionService>,
    path: web::Path<(String,)>,
) -> RestResult<HttpResponse> {
    let (id,) = path.into_inner();
    let id: SubscriptionId = id.parse()?;

    let subscription = service.delete(id).await?;

    json_response(StatusCode::OK, &subscription)
}

/// Subscriptions API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/subscriptions")
        .app_data(
            web::JsonConfig::default()
                .content_type_required(false)
                .content_type(|_| true)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(create)
        .service(list)
        // Must be registered ahead of `/{id}`
        .service(total)
        .service(fetch)
        .service(update)
        .service(remove)
}
