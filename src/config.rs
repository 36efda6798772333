//! Environment-driven configuration, read once at startup.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// Base URL of the hosted backend (identity + relational endpoints).
    pub backend_url: String,
    /// Service key sent as the `apikey` header on every backend call.
    pub backend_key: String,
    pub request_timeout: Duration,
    pub login_path: String,
    pub fallback_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        let http_port = std::env::var("STUDYHALL_HTTP_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(7878);
        let backend_url = std::env::var("STUDYHALL_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:54321".to_string())
            .trim_end_matches('/')
            .to_string();
        let backend_key = std::env::var("STUDYHALL_BACKEND_KEY").unwrap_or_default();
        let timeout_ms = std::env::var("STUDYHALL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5000);
        let login_path =
            std::env::var("STUDYHALL_LOGIN_PATH").unwrap_or_else(|_| "/login".to_string());
        let fallback_path =
            std::env::var("STUDYHALL_FALLBACK_PATH").unwrap_or_else(|_| "/".to_string());
        Self {
            http_port,
            backend_url,
            backend_key,
            request_timeout: Duration::from_millis(timeout_ms),
            login_path,
            fallback_path,
        }
    }
}
