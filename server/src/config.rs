use anyhow::{Context, Result};
use axum::http::HeaderValue;

/// Server settings read from the environment. Database settings live in
/// `platform_db::DatabaseSettings`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Origins allowed by CORS. Empty means any origin.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl AppConfig {
    /// Fails when `CORS_ALLOWED_ORIGINS` holds an entry that is not a valid
    /// header value.
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw).context("invalid CORS_ALLOWED_ORIGINS")?,
            Err(_) => Vec::new(),
        };
        Ok(Self {
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("bad origin {origin:?}"))
        })
        .collect()
}
