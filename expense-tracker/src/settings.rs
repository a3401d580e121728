use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: String,
    pub auth_token: Option<SecretString>,
    pub recent_days: i64,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default = "default_backend_url")]
    backend_url: String,
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default = "default_recent_days")]
    recent_days: i64,
}

fn default_backend_url() -> String {
    expense_api::DEFAULT_BASE_URL.to_string()
}

fn default_recent_days() -> i64 {
    7
}

/// Upper bound for `recent_days`, about a century
pub const MAX_RECENT_DAYS: i64 = 36_500;

impl Settings {
    /// Load from `config.toml` (or `$EXPENSES_CONFIG`), then `EXPENSES_*` env vars
    pub fn new() -> Result<Self, SettingsError> {
        let config_path =
            std::env::var("EXPENSES_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(&config_path).required(false))
                .add_source(
                    Environment::with_prefix("EXPENSES")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let raw: RawSettings = builder.build()?.try_deserialize()?;

        Ok(Self {
            backend_url: raw.backend_url,
            auth_token: raw
                .auth_token
                .filter(|token| !token.trim().is_empty())
                .map(SecretString::from),
            recent_days: raw.recent_days,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.backend_url.is_empty() {
            return Err(SettingsError::Invalid(
                "backend_url is required".to_string(),
            ));
        }
        if !self.backend_url.starts_with("http") {
            return Err(SettingsError::Invalid(
                "backend_url must be a valid HTTP(S) URL".to_string(),
            ));
        }
        if self.recent_days <= 0 {
            return Err(SettingsError::Invalid(
                "recent_days must be greater than zero".to_string(),
            ));
        }
        if self.recent_days > MAX_RECENT_DAYS {
            return Err(SettingsError::Invalid(format!(
                "recent_days must be at most {}",
                MAX_RECENT_DAYS
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            auth_token: None,
            recent_days: default_recent_days(),
        }
    }
}
