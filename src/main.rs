use tracing::info;
use tracing_subscriber::EnvFilter;

use portal_admin_api::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portal_admin_api=info,tower_http=info")),
        )
        .init();

    let config = config::config().clone();
    info!("Starting portal admin API in {:?} mode", config.environment);

    let state = server::build_state(config).await?;
    server::serve(state).await
}
