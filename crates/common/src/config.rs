use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Redis connection string (record store + delivery queue)
    pub redis_url: String,

    /// Transactional mail API endpoint (Resend-compatible)
    pub mail_api_url: String,

    /// API key for the mail endpoint; mail delivery is disabled when absent
    pub mail_api_key: Option<String>,

    /// Email sender address (default: no-reply@courseherald.dev)
    pub email_from: String,

    /// BRPOP timeout for the delivery worker, in seconds (default: 5)
    pub worker_poll_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            mail_api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            mail_api_key: std::env::var("MAIL_API_KEY").ok(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@courseherald.dev".to_string()),
            worker_poll_timeout_secs: std::env::var("WORKER_POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("WORKER_POLL_TIMEOUT_SECS must be a valid u64"))?,
        })
    }
}
