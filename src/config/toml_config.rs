use crate::domain::form::Locale;
use crate::utils::error::{KonekteError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5555";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub display: Option<DisplayConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "compact" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KonekteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KonekteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names stay as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KonekteError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            crate::utils::validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(locale) = self.display.as_ref().and_then(|d| d.locale.as_deref()) {
            crate::utils::validation::validate_non_empty_string("display.locale", locale)?;
            locale
                .parse::<Locale>()
                .map_err(|reason| KonekteError::InvalidConfigValueError {
                    field: "display.locale".to_string(),
                    value: locale.to_string(),
                    reason,
                })?;
        }

        let valid_formats = ["compact", "json"];
        if let Some(format) = self.log_format() {
            if !valid_formats.contains(&format) {
                return Err(KonekteError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// Falls back to the default locale when unset or unparseable;
    /// `validate_config` reports the latter.
    pub fn locale(&self) -> Locale {
        self.display
            .as_ref()
            .and_then(|d| d.locale.as_deref())
            .and_then(|l| l.parse().ok())
            .unwrap_or_default()
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format() == Some("json")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://konekte.example.ht"
timeout_seconds = 5

[display]
locale = "en"

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://konekte.example.ht");
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.locale(), Locale::En);
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = TomlConfig::from_toml_str("[api]\nbase_url = \"http://localhost:5555\"\n").unwrap();
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.locale(), Locale::Fr);
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KONEKTE_TEST_API_URL", "https://test.konekte.ht");

        let toml_content = r#"
[api]
base_url = "${KONEKTE_TEST_API_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://test.konekte.ht");

        std::env::remove_var("KONEKTE_TEST_API_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[api]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_locale = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://localhost:5555\"\n[display]\nlocale = \"de\"\n",
        )
        .unwrap();
        assert!(matches!(
            bad_locale.validate(),
            Err(KonekteError::InvalidConfigValueError { .. })
        ));

        let bad_timeout = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://localhost:5555\"\ntimeout_seconds = 0\n",
        )
        .unwrap();
        assert!(bad_timeout.validate().is_err());

        let bad_format = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://localhost:5555\"\n[logging]\nformat = \"xml\"\n",
        )
        .unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://127.0.0.1:5555\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5555");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here/konekte.toml").unwrap_err();
        assert!(matches!(err, KonekteError::IoError(_)));
    }
}
