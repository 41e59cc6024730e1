mod db;
mod error;
mod mailer;
mod notification;
mod routes;
mod state;

use std::sync::Arc;

use db::{create_pool, run_migrations};
use mailer::{SmtpConfig, SmtpMailer};
use notification::{start_notification_dispatcher, NotificationService, PgNotificationRepository};
use routes::create_router;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,event_notifier=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    let repository = Arc::new(PgNotificationRepository::new(db.clone()));
    let smtp_mailer = Arc::new(SmtpMailer::new(SmtpConfig::from_env())?);

    let notification_service = NotificationService::new(repository.clone());

    // Start the delivery sweep; the handle is kept for shutdown.
    let mut scheduler = start_notification_dispatcher(repository, smtp_mailer).await?;

    let state = AppState {
        notification_service,
    };
    let app = create_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    tracing::info!("Notification dispatcher stopped");

    db.close().await;
    tracing::info!("Database connection closed");

    Ok(())
}

/// Resolves on SIGINT (Ctrl-C) or, on unix, SIGTERM — the stop signal sent
/// by service managers such as systemd and Docker.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
