use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

// ============================================================================
// Application Configuration
// ============================================================================
//
// Read from the environment. A `.env` file in the working directory is
// loaded first by the binary when present.
//
//   SOROCAPS_API_URL            base URL of the REST API
//   SOROCAPS_SESSION_FILE       where the signed-in session is persisted
//   SOROCAPS_HTTP_TIMEOUT_SECS  per-request timeout
//
// ============================================================================

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_SESSION_FILE: &str = ".sorocaps/session.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("SOROCAPS_API_URL").unwrap_or(defaults.api_url);

        let session_file = lookup("SOROCAPS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let http_timeout = match lookup("SOROCAPS_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("SOROCAPS_HTTP_TIMEOUT_SECS is not a number: {raw:?}"))?;
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Self {
            api_url,
            session_file,
            http_timeout,
        })
    }
}
