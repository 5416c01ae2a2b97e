use anyhow::Result;
use config::Config;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_UID_DOMAIN, PRODUCT_ID};
use crate::error::{CoreError, CoreResult};
use crate::types::DuplicateDetectionConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub dedup: DuplicateDetectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values stamped into generated documents.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CodecConfig {
    pub product_id: String,
    pub uid_domain: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            product_id: PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

impl CodecConfig {
    /// ## Summary
    /// Checks that the configured values can be written into a content line.
    ///
    /// ## Errors
    /// Returns an error if a value is empty or contains a line break.
    pub fn validate(&self) -> CoreResult<()> {
        for (key, value) in [
            ("codec.product_id", &self.product_id),
            ("codec.uid_domain", &self.uid_domain),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigError(format!("{key} must not be empty")));
            }
            if value.contains(['\r', '\n']) {
                return Err(CoreError::ConfigError(format!(
                    "{key} must not contain line breaks"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `warn,almanac_rfc=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// ## Summary
    /// Builds the subscriber filter for the configured level.
    ///
    /// ## Errors
    /// Returns an error if `level` is not a valid filter directive.
    pub fn env_filter(&self) -> CoreResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            CoreError::ConfigError(format!("logging.level '{}' is invalid: {e}", self.level))
        })
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it
    /// fails, or if the codec or logging section is unusable.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("codec.product_id", PRODUCT_ID)?
            .set_default("codec.uid_domain", DEFAULT_UID_DOMAIN)?
            .set_default("dedup.use_uid", true)?
            .set_default("dedup.use_name", true)?
            .set_default("dedup.use_email", true)?
            .set_default("dedup.use_phone", false)?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env vars (ALMANAC_DEDUP__USE_PHONE=true)
            .add_source(
                config::Environment::with_prefix("ALMANAC")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.codec.validate()?;
        settings.logging.env_filter()?;
        tracing::debug!(codec = ?settings.codec, dedup = ?settings.dedup, "Settings loaded");

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
