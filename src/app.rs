use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::middleware::{from_fn, NormalizePath};
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::controller::subscriptions;
use crate::repo::PgSubscriptionRepo;
use crate::service::SubscriptionService;
use crate::telemetry::log_request;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Register shared data and every endpoint on an application
pub fn routes(service: web::Data<SubscriptionService>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(service)
            .service(health_check)
            .service(subscriptions::scope());
    }
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, pool: PgPool) -> anyhow::Result<Server> {
    // Wrap application data
    let service = web::Data::new(SubscriptionService::new(PgSubscriptionRepo::new(pool)));

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(from_fn(log_request))
            .wrap(TracingLogger::default())
            .configure(routes(service.clone()))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
