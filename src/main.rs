mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::config::ConfigError,
    mail::LogMailer,
    router,
    scheduler::rental_jobs::{self, RentalJobs},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,car_rental=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    startup::check_for_admin(&db, &config).await?;

    let _scheduler = rental_jobs::start_scheduler(
        db.clone(),
        RentalJobs {
            mailer: Arc::new(LogMailer),
            mail_from: config.mail_from.clone(),
            pending_hold: config.pending_hold,
        },
    )
    .await?;

    let governor_config = GovernorConfigBuilder::default()
        .per_second(config.rate_limit_per_second)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or(ConfigError::InvalidRateLimit {
            per_second: config.rate_limit_per_second,
            burst: config.rate_limit_burst,
        })?;

    let app = router::router()
        .with_state(AppState::new(db, config.token_ttl))
        .layer(GovernorLayer::new(Arc::new(governor_config)))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
