//! Runtime configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use core_kernel::{CoreError, Currency, Timezone};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimsConfig {
    /// Log level or EnvFilter directive
    pub log_level: String,
    pub log_format: LogFormat,
    /// ISO currency code claims are paid in
    pub currency: String,
    /// IANA zone used for report dates
    pub timezone: String,
    /// JSON file of submissions for the batch runner
    #[serde(default)]
    pub batch_file: Option<String>,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            currency: "ZAR".to_string(),
            timezone: "Africa/Johannesburg".to_string(),
            batch_file: None,
        }
    }
}

impl ClaimsConfig {
    /// Loads configuration from `CLAIMS_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("CLAIMS"))
    }

    /// Loads configuration from an environment source over the defaults
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("currency", defaults.currency)?
            .set_default("timezone", defaults.timezone)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn currency(&self) -> Result<Currency, CoreError> {
        Ok(self.currency.parse::<Currency>()?)
    }

    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        Ok(self.timezone.parse::<Timezone>()?)
    }
}
