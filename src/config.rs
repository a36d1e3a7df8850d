use crate::error::{HabitatError, Result};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub soilgrids: SoilGridsConfig,
    pub globalforestwatch: Option<GlobalForestWatchConfig>,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ports may arrive as numbers or, after `${VAR}` substitution, as strings.
fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(value) => value.trim().parse::<u16>().map_err(|_| {
            D::Error::custom(format!(
                "invalid port '{}' - ensure HABITAT_PORT environment variable is set",
                value
            ))
        }),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .user_agent(concat!("habitat/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoilGridsConfig {
    #[serde(default = "default_soilgrids_url")]
    pub base_url: String,
    #[serde(default)]
    pub enabled: bool,
}

fn default_soilgrids_url() -> String {
    "https://rest.isric.org/soilgrids/v2.0".into()
}

impl Default for SoilGridsConfig {
    fn default() -> Self {
        Self {
            base_url: default_soilgrids_url(),
            enabled: false,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct GlobalForestWatchConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_lookback_days() -> u32 {
    30
}

impl std::fmt::Debug for GlobalForestWatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalForestWatchConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .field("lookback_days", &self.lookback_days)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SyntheticConfig {
    /// Fixed seed for synthetic satellite and history data. Random per process if unset.
    pub seed: Option<u64>,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(HabitatError::Config(format!(
                "Config file not found at {:?}. Run `habitat init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HabitatError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Load the config if one exists, otherwise run with defaults (every upstream off).
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            return Self::load(config_override);
        }

        if let Some(path) = config_override {
            return Err(HabitatError::Config(format!(
                "Config file not found at {:?}",
                path
            )));
        }

        tracing::warn!(
            "No config file found - running with defaults, upstream data will use fallbacks"
        );
        Ok(Self::default())
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| HabitatError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("habitat").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/habitat/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HabitatError::Config("Cannot determine config directory".into()))?
            .join("habitat");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Habitat.");
        println!();

        println!("Server");
        let host: String = Input::new()
            .with_prompt("  Bind host")
            .default("127.0.0.1".into())
            .interact_text()
            .map_err(|e| HabitatError::Config(format!("Input error: {}", e)))?;

        let port: u16 = Input::new()
            .with_prompt("  Port")
            .default(3000)
            .interact_text()
            .map_err(|e| HabitatError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("OpenWeatherMap (leave API key blank to skip)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HabitatError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("Global Forest Watch (leave API key blank to skip)");
        let gfw_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HabitatError::Config(format!("Input error: {}", e)))?;

        println!();
        let soilgrids_enabled = Confirm::new()
            .with_prompt("Query ISRIC SoilGrids for soil pH?")
            .default(true)
            .interact()
            .map_err(|e| HabitatError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            server: ServerConfig { host, port },
            upstream: UpstreamConfig::default(),
            openweathermap: (!owm_api_key.is_empty()).then(|| OpenWeatherMapConfig {
                api_key: owm_api_key,
                enabled: true,
            }),
            soilgrids: SoilGridsConfig {
                enabled: soilgrids_enabled,
                ..SoilGridsConfig::default()
            },
            globalforestwatch: (!gfw_api_key.is_empty()).then(|| GlobalForestWatchConfig {
                api_key: gfw_api_key,
                enabled: true,
                lookback_days: default_lookback_days(),
            }),
            synthetic: SyntheticConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| HabitatError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Habitat Configuration\n\
             # Generated by `habitat init`\n\
             # Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!();
        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        for cap in ENV_PLACEHOLDER.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  host: 0.0.0.0\n  port: 8080\n").unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.openweathermap.is_none());
        assert!(!config.soilgrids.enabled);
        assert!(config.synthetic.seed.is_none());
    }

    #[test]
    fn empty_mapping_is_default() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn port_accepts_quoted_string() {
        let config = Config::from_yaml("server:\n  host: localhost\n  port: \"9090\"\n").unwrap();
        assert_eq!(config.server.port, 9090);

        let err = Config::from_yaml("server:\n  host: localhost\n  port: \"nope\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("HABITAT_TEST_OWM_KEY", "secret-key");
        let yaml = "openweathermap:\n  api_key: ${HABITAT_TEST_OWM_KEY}\n";
        let config = Config::from_yaml(yaml).unwrap();
        let owm = config.openweathermap.unwrap();
        assert_eq!(owm.api_key, "secret-key");
        assert!(owm.enabled);
    }

    #[test]
    fn unknown_env_vars_left_in_place() {
        let result = Config::substitute_env_vars("key: ${HABITAT_TEST_DOES_NOT_EXIST}");
        assert_eq!(result, "key: ${HABITAT_TEST_DOES_NOT_EXIST}");
    }

    #[test]
    fn secrets_redacted_in_debug() {
        let gfw = GlobalForestWatchConfig {
            api_key: "very-secret".into(),
            enabled: true,
            lookback_days: 30,
        };
        let debug = format!("{:?}", gfw);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
