//! Playground HTTP server.
//!
//! Loads configuration, connects to PostgreSQL, and serves the playground
//! routes behind session authentication.

use std::sync::Arc;

use anyhow::{Context, Result};
use http::{header, HeaderValue, Method};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use playground::adapters::auth::{JwtConfig, JwtSessionValidator};
use playground::adapters::http::{app_router, AppDependencies};
use playground::adapters::postgres::{PostgresToolRepository, PostgresUserToolStateRepository};
use playground::adapters::view::JsonViewRenderer;
use playground::config::AppConfig;
use playground::domain::execution::ExecutorRegistry;
use playground::ports::{ToolFilter, ToolRepository};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_logging(&config);

    info!(
        environment = ?config.server.environment,
        database = %config.database.redacted_url(),
        "Starting playground v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        info!("Database migrations applied");
    }

    let tools: Arc<dyn ToolRepository> = Arc::new(PostgresToolRepository::new(pool.clone()));
    let states = Arc::new(PostgresUserToolStateRepository::new(pool));
    let executors = Arc::new(ExecutorRegistry::builtin());

    warn_unregistered_tools(tools.as_ref(), &executors).await;

    let validator = JwtSessionValidator::new(&JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        issuer: config.auth.issuer.clone(),
        audience: config.auth.audience.clone(),
    });

    let app = app_router(AppDependencies {
        tools,
        states,
        executors,
        renderer: Arc::new(JsonViewRenderer::new().with_version(env!("CARGO_PKG_VERSION"))),
        validator: Arc::new(validator),
        login_path: config.auth.login_path.clone(),
        session_cookie: config.auth.session_cookie.clone(),
    })
    .layer(cors_layer(&config.server.cors_origins_list()))
    .layer(TimeoutLayer::new(config.server.request_timeout()))
    .layer(TraceLayer::new_for_http())
    .layer(CatchPanicLayer::new());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// `server.log_level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .init();
    }
}

/// Warns once per active tool that would answer `Tool not implemented`.
async fn warn_unregistered_tools(tools: &dyn ToolRepository, executors: &ExecutorRegistry) {
    match tools.list(&ToolFilter::active()).await {
        Ok(active) => {
            for tool in executors.unregistered(&active) {
                warn!(slug = %tool.slug(), "Active tool has no registered executor");
            }
        }
        Err(e) => warn!(error = %e, "Could not check tool executors"),
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
