use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use thaibill::config::{database, Config};
use thaibill::middleware::{RateLimiter, RequestId, API_KEY_HEADER};
use thaibill::startup::{AppState, Repositories};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("thaibill={},actix_web=info", config.app.log_level))
    });
    let json = config.app.log_format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .allowed_header(API_KEY_HEADER)
        .allowed_header("X-Request-ID")
        .expose_headers(vec!["X-Request-ID"])
        .max_age(3600);

    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        env = %config.app.env,
        access_policy = ?config.billing.access_policy,
        amount_policy = ?config.billing.amount_policy,
        "Starting ThaiBill"
    );

    // Create database connection pool
    let pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        database::migrate(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    let state = AppState::new(Repositories::mysql(pool), &config.billing);
    // One quota shared by every worker
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)?;
    let allowed_origin = config.security.cors_allowed_origin.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .configure(move |cfg| state.configure(cfg))
            .wrap(rate_limiter.clone())
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(TracingLogger::default())
            .wrap(RequestId)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!(address = %bind_address, "Server started");

    server.await?;
    Ok(())
}
