//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default chat platform API base URL.
fn default_api_base_url() -> String {
    "https://api.hipchat.com/v2".to_string()
}

/// Default room for notifications from routes without a room in the payload.
fn default_room_id() -> u64 {
    447199
}

/// Default trigger phrase for the mention-tracking route.
fn default_mention_trigger() -> String {
    "deltaco".to_string()
}

/// Default Giphy public beta API key.
fn default_giphy_api_key() -> String {
    "dc6zaTOxFJmzC".to_string()
}

/// Default Giphy search endpoint.
fn default_giphy_base_url() -> String {
    "https://api.giphy.com/v1/gifs/search".to_string()
}

/// Default listen address for the webhook server.
fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

/// Default timeout for outbound HTTP calls.
fn default_http_timeout_secs() -> u64 {
    10
}

/// Configuration for the relay-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// The shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, loaded from environment variables and an
/// optional TOML file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Chat platform auth token (`RELAY_BOT_AUTH_TOKEN`).
    pub auth_token: String,
    /// Chat platform API base URL (`RELAY_BOT_API_BASE_URL`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Room that receives mention and gif-search notifications (`RELAY_BOT_DEFAULT_ROOM_ID`).
    #[serde(default = "default_room_id")]
    pub default_room_id: u64,
    /// Trigger phrase counted by the mention-tracking route (`RELAY_BOT_MENTION_TRIGGER`).
    #[serde(default = "default_mention_trigger")]
    pub mention_trigger: String,
    /// Giphy API key (`RELAY_BOT_GIPHY_API_KEY`).
    #[serde(default = "default_giphy_api_key")]
    pub giphy_api_key: String,
    /// Giphy search endpoint (`RELAY_BOT_GIPHY_BASE_URL`).
    #[serde(default = "default_giphy_base_url")]
    pub giphy_base_url: String,
    /// Listen address for the webhook server (`RELAY_BOT_BIND_ADDR`).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Timeout for outbound HTTP calls, in seconds (`RELAY_BOT_HTTP_TIMEOUT_SECS`).
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load and validate the configuration.
    ///
    /// A missing or empty auth token is fatal; the process must not
    /// start without a credential.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("RELAY_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.auth_token.is_empty() {
            return Err(anyhow::anyhow!("Auth token must not be empty."));
        }

        if result.http_timeout_secs < 1 {
            return Err(anyhow::anyhow!("HTTP timeout must be at least one second."));
        }

        Ok(result)
    }
}
