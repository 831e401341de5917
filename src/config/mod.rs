#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::form::Locale;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use toml_config::{TomlConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};

/// Effective client settings: defaults, then the TOML file, then flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub locale: Locale,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            locale: Locale::default(),
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            api_base_url: config.api.base_url.clone(),
            timeout_seconds: config.timeout_seconds(),
            locale: config.locale(),
            json_logs: config.json_logs(),
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        if let Some(timeout) = timeout_seconds {
            self.timeout_seconds = timeout;
        }
        self
    }

    pub fn with_locale(mut self, locale: Option<Locale>) -> Self {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_base_url)?;
        validate_range("timeout", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}
