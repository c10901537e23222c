use std::net::TcpListener;

use anyhow::Context;

use subscriptions_api::app;
use subscriptions_api::settings::Settings;
use subscriptions_api::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    telemetry::set_subscriber(telemetry::create_subscriber(env_filter, std::io::stdout))?;

    let settings = Settings::load().context("Failed to load settings")?;

    let pool = settings
        .database
        .pool_options()
        .connect_with(settings.database.with_db())
        .await
        .context("Failed to connect to Postgres")?;
    tracing::info!("Postgres connected");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations complete");

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, pool)?
        .await
        .context("Failed to run app")
}
