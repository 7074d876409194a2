use crate::config::MAX_TIMEOUT_SECONDS;
use crate::core::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{KiotVietError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KiotVietError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KiotVietError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KiotVietError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.client.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.client.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("client.base_url", &self.client.base_url)?;
        validate_range(
            "client.timeout_seconds",
            self.client.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_client_section() {
        let toml_content = r#"
[client]
base_url = "http://127.0.0.1:6070/"
timeout_seconds = 12
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:6070/");
        assert_eq!(config.timeout_seconds(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_url(), "https://public.kiotapi.com");
        assert_eq!(config.timeout_seconds(), 30);
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("KV_TOML_TEST_BASE", "http://mock.local:9999");
        let toml_content = r#"
[client]
base_url = "${KV_TOML_TEST_BASE}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "http://mock.local:9999");
    }

    #[test]
    fn test_unknown_env_var_fails_validation() {
        let toml_content = r#"
[client]
base_url = "${KV_TOML_TEST_DOES_NOT_EXIST}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "${KV_TOML_TEST_DOES_NOT_EXIST}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\ntimeout_seconds = 900").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_seconds(), 900);
        assert!(matches!(
            config.validate(),
            Err(KiotVietError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[client\nbase_url = 1").unwrap_err();
        assert!(matches!(err, KiotVietError::ConfigError { .. }));
    }
}
