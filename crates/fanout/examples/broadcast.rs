//! Send a test broadcast through the production wiring.
//!
//! Requires `DATABASE_URL`, `PUSH_APP_ID` and `PUSH_API_KEY`:
//!
//! ```bash
//! cargo run -p pawhaven-fanout --example broadcast
//! ```

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use pawhaven_common::config::AppConfig;
use pawhaven_common::db::create_pool;
use pawhaven_fanout::service::BroadcastService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pawhaven_fanout=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;

    let service = BroadcastService::from_config(pool, &config);
    let summary = service
        .notify_new_event("Adoption Day at the shelter", Uuid::new_v4(), Some("Dana"))
        .await?;

    tracing::info!(?summary, "Test broadcast finished");
    Ok(())
}
