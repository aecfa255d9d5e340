use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};

use user_gallery::{
    app::users::{memory::MemoryUserRepository, repository::UserRepository, service::UserService},
    build_router,
    infrastructure::{logger::Logger, uploads::UploadStore},
    AppConfig, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    Logger::init(Level::INFO);

    let config = AppConfig::from_env();
    info!(
        address = %config.address(),
        public_dir = %config.public_dir.display(),
        per_page = config.per_page,
        upload_limit = config.upload_limit,
        "Starting user gallery"
    );

    let repo = open_repository(&config).await?;

    let uploads = UploadStore::new(config.uploads_dir());
    uploads
        .ensure_dir()
        .await
        .with_context(|| format!("creating {}", uploads.dir().display()))?;

    let user_service = UserService::new(repo, uploads, config.per_page);
    let state = AppState {
        user_service: user_service.clone(),
    };
    let app = build_router(state, &config.public_dir, config.upload_limit);

    let listener = TcpListener::bind(config.address())
        .await
        .with_context(|| format!("binding {}", config.address()))?;
    info!(address = %listener.local_addr()?, "Server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Listener closed");
    user_service.close().await;
    info!("Shutdown complete");

    Ok(())
}

async fn open_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
    match &config.database {
        #[cfg(feature = "database")]
        Some(db) => {
            use user_gallery::{
                app::users::postgres::PgUserRepository,
                infrastructure::database::DatabaseManager,
            };

            let manager = DatabaseManager::new(db)
                .await
                .context("connecting to database")?;
            let repo = PgUserRepository::new(manager.into_pool());
            repo.ensure_collection()
                .await
                .context("preparing users collection")?;
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "database"))]
        Some(_) => anyhow::bail!("DATABASE_URL is set but the `database` feature is disabled"),
        None => {
            warn!("DATABASE_URL not set, running with the in-process store");
            Ok(Arc::new(MemoryUserRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
