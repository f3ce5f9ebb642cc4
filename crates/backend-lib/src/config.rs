// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Minimum length for the token signing secret.
const MIN_SECRET_LENGTH: usize = 32;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Secret used to sign session tokens. Rotating it invalidates
    /// all outstanding tokens.
    pub token_secret: String,
    /// Token validity window in seconds
    pub token_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".parse().expect("valid default addr"),
            log_level: "info".to_string(),
            // Development-only default; deployments override via
            // tracklist.toml or TRACKLIST_TOKEN_SECRET.
            token_secret: "dev-secret-change-me-dev-secret-change-me".to_string(),
            token_ttl_secs: 60 * 60 * 24, // 24 hours
        }
    }
}

impl Settings {
    /// Load settings from defaults, config file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from("tracklist.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TRACKLIST_"))
            .extract()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!("invalid log level: {other}"),
        }

        if self.token_ttl_secs == 0 {
            anyhow::bail!("token_ttl_secs must be greater than zero");
        }

        if self.token_secret.len() < MIN_SECRET_LENGTH {
            anyhow::bail!("token_secret must be at least {MIN_SECRET_LENGTH} bytes");
        }

        Ok(())
    }
}
