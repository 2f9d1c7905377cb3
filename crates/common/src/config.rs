use serde::Deserialize;

/// Default number of recipients dispatched concurrently per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Push gateway credentials and endpoint
    pub gateway: GatewayConfig,

    /// Number of recipients dispatched concurrently per batch (default: 50)
    pub fanout_batch_size: usize,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,
}

/// Push gateway configuration, injected into the push client at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway notifications endpoint
    pub api_url: String,

    /// Application id registered with the gateway
    pub app_id: String,

    /// REST API key, sent as a Basic authorization credential
    pub api_key: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // chunks() panics on 0, so clamp at load time
        let fanout_batch_size: usize = std::env::var("FANOUT_BATCH_SIZE")
            .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("FANOUT_BATCH_SIZE must be a valid usize"))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            gateway: GatewayConfig {
                api_url: std::env::var("PUSH_GATEWAY_URL").unwrap_or_else(|_| {
                    "https://api.onesignal.com/api/v1/notifications".to_string()
                }),
                app_id: std::env::var("PUSH_APP_ID")
                    .map_err(|_| anyhow::anyhow!("PUSH_APP_ID environment variable is required"))?,
                api_key: std::env::var("PUSH_API_KEY")
                    .map_err(|_| anyhow::anyhow!("PUSH_API_KEY environment variable is required"))?,
            },
            fanout_batch_size: fanout_batch_size.max(1),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
        })
    }
}
