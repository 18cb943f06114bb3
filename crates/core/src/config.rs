use std::env;

use serde::{Deserialize, Serialize};

use crate::color::RedSet;
use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub webhook: WebhookConfig,
    pub trigger: TriggerConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            webhook: WebhookConfig::from_env(),
            trigger: TriggerConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs. The shared secret is
    /// never logged, only whether one is set.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  webhook:  url={}, secret={}",
            self.webhook.endpoint_url.as_deref().unwrap_or("(none)"),
            if self.webhook.shared_secret.is_some() { "set" } else { "(none)" },
        );
        tracing::info!("  trigger:  red_colors={} tokens", self.trigger.red_colors.len());
    }
}

// ── Webhook ───────────────────────────────────────────────────

/// Destination and shared secret for the outbound notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub endpoint_url: Option<String>,
    pub shared_secret: Option<String>,
}

impl WebhookConfig {
    fn from_env() -> Self {
        Self {
            endpoint_url: env_opt("WEBHOOK_URL"),
            shared_secret: env_opt("WEBHOOK_SECRET"),
        }
    }

    /// Resolve into concrete values, failing if either is unset.
    /// Commands that never dispatch skip this call entirely.
    pub fn require(&self) -> Result<(String, String), ConfigError> {
        let url = self
            .endpoint_url
            .clone()
            .ok_or(ConfigError::Missing("WEBHOOK_URL"))?;
        let secret = self
            .shared_secret
            .clone()
            .ok_or(ConfigError::Missing("WEBHOOK_SECRET"))?;
        Ok((url, secret))
    }
}

// ── Trigger ───────────────────────────────────────────────────

/// Detection settings: which background tokens count as red.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(skip)]
    pub red_colors: RedSet,
}

impl TriggerConfig {
    fn from_env() -> Self {
        Self {
            red_colors: match env_opt("RED_COLORS") {
                Some(raw) => parse_red_colors(&raw),
                None => RedSet::default(),
            },
        }
    }
}

/// Parse a comma-separated token list (e.g. `"#ff0000,#cc0000,red"`).
/// Blank entries are dropped; an all-blank list falls back to defaults.
pub fn parse_red_colors(raw: &str) -> RedSet {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        RedSet::default()
    } else {
        RedSet::new(tokens)
    }
}
