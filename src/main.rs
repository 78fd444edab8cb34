use tracing_subscriber::EnvFilter;

use clinic_api::api::server;
use clinic_api::api::ApiContext;
use clinic_api::config::{self, Config};
use clinic_api::db;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = Config::from_env();

    if let Some(parent) = config.db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Cannot create data directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    let conn = match db::open_database(&config.db_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Cannot open store at {}: {e}", config.db_path.display());
            std::process::exit(1);
        }
    };
    tracing::info!(path = %config.db_path.display(), "Store ready");

    let ctx = ApiContext::new(conn);
    if let Err(e) = server::serve(ctx, &config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
