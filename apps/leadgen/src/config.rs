use anyhow::Result;

/// Default base URL of the bio-generation service (local dev).
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables.
/// Every variable has a working local default, so `leadgen` runs with no setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the bio-generation service.
    pub service_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            service_url: std::env::var("LEADGEN_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
