use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeline_service::{auth, db, handlers, Config};

/// Timeline Service
///
/// Serves the post timeline: post creation with optional file
/// attachments, listing, single-post reads, attachment downloads, and
/// the delete cascade, plus comments, likes, and the follow graph.
///
/// # Routes
///
/// - `/health` - liveness probe, unauthenticated
/// - `/api/posts/*` - post lifecycle and attachment downloads
/// - `/api/comments/*`, `/api/likes/*`, `/api/follow`, `/api/unfollow/*`
///
/// Every `/api` route requires a bearer token issued by the identity
/// service; this process only holds the validation key.
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting timeline-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // JWT validation key, required before any request is served
    match auth::load_validation_key() {
        Ok(public_key) => {
            if let Err(err) = auth::initialize_validation_key(&public_key) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT validation: {err}"),
                ));
            }
            tracing::info!("JWT validation key initialized");
        }
        Err(err) => {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("JWT public key unavailable: {err}"),
            ));
        }
    }

    // Database pool + startup probe
    let pool = db::create_pool(&config.database).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to create database pool: {e}"),
        )
    })?;

    sqlx::query("SELECT 1").execute(&pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Database connectivity check failed: {e}"),
        )
    })?;
    tracing::info!("Database connection verified");

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Migrations failed: {e}"))
    })?;
    tracing::info!("Migrations applied");

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Listening on {}", bind_addr);

    let app_config = config.clone();
    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in app_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
