use thiserror::Error;

/// Configuration problems surfaced at startup, before any evaluation runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
