use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_MAX_HISTORY, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_RESPONSE_TIMEOUT_SECS, DEFAULT_TEMPERATURE, HTTP_CONNECT_TIMEOUT_SECS,
};
use crate::utils::ImmigoError;

const LOCAL_CONFIG_PATH: &str = ".immigo/config.toml";
const ENV_PREFIX: &str = "IMMIGO_";

/// Main configuration structure
///
/// Loaded once at startup and handed by reference to the gateway and the
/// session; nothing below this layer reads the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Chat-completion service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// History bounds
    #[serde(default)]
    pub history: HistoryConfig,

    /// Session behaviour
    #[serde(default)]
    pub session: SessionConfig,
}

/// Chat-completion service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Bearer credential; requests are never attempted without it
    pub key: Option<String>,
    /// Full chat-completions endpoint URL
    pub url: String,
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// TCP connect timeout for the HTTP client
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            connect_timeout_secs: HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// The configured key, ignoring blank values
    pub fn credential(&self) -> Option<&str> {
        self.key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of messages sent to the service per turn
    pub max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds to wait for a reply before giving up (0 waits forever)
    pub response_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            response_timeout_secs: DEFAULT_RESPONSE_TIMEOUT_SECS,
        }
    }
}

impl SessionConfig {
    pub fn response_timeout(&self) -> Option<Duration> {
        (self.response_timeout_secs > 0).then(|| Duration::from_secs(self.response_timeout_secs))
    }
}

impl Config {
    /// Reject values the session cannot work with
    pub fn validate(&self) -> Result<(), ImmigoError> {
        if self.history.max_history == 0 {
            return Err(ImmigoError::ConfigError(
                "history.max_history must be at least 1".to_string(),
            ));
        }
        if self.api.url.trim().is_empty() {
            return Err(ImmigoError::ConfigError("api.url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    load_config_from(Some(&global_config), Path::new(LOCAL_CONFIG_PATH))
}

/// Load configuration with explicit file locations
///
/// Later sources win: defaults, global file, local file, `IMMIGO_` env vars
/// (`__` separates sections, e.g. `IMMIGO_API__KEY`).
pub fn load_config_from(global_config: Option<&Path>, local_config: &Path) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(global) = global_config.filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(global));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(local_config));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment
        .extract()
        .context("Failed to load configuration")
}

/// Read a single TOML file on top of the defaults
pub fn load_config_file(path: &Path) -> Result<Config> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "immigo") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("immigo");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    let local_example = PathBuf::from(".immigo/config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# ImmiGo Local Configuration
# This file overrides global settings when immigo runs from this directory

[api]
# key = "sk-..."            # or export IMMIGO_API_KEY
url = "https://api.openai.com/v1/chat/completions"

[history]
max_history = 20

[session]
response_timeout_secs = 60
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.key, None);
        assert_eq!(config.api.model, "gpt-3.5-turbo");
        assert_eq!(config.api.max_tokens, 1000);
        assert_eq!(config.history.max_history, 20);
        assert_eq!(
            config.session.response_timeout(),
            Some(Duration::from_secs(60))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_no_credential() {
        let mut api = ApiConfig::default();
        api.key = Some("   ".to_string());
        assert_eq!(api.credential(), None);

        api.key = Some(" sk-test ".to_string());
        assert_eq!(api.credential(), Some("sk-test"));
    }

    #[test]
    fn test_zero_timeout_disables() {
        let session = SessionConfig {
            response_timeout_secs: 0,
        };
        assert_eq!(session.response_timeout(), None);
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let mut config = Config::default();
        config.history.max_history = 0;
        assert!(matches!(
            config.validate(),
            Err(ImmigoError::ConfigError(_))
        ));
    }

    #[test]
    fn test_layered_loading() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "global.toml",
                r#"
                [api]
                key = "global-key"
                url = "https://global.example/v1/chat/completions"

                [history]
                max_history = 8
                "#,
            )?;
            jail.create_file(
                "local.toml",
                r#"
                [history]
                max_history = 12
                "#,
            )?;
            jail.set_env("IMMIGO_API__KEY", "env-key");

            let config = load_config_from(Some(Path::new("global.toml")), Path::new("local.toml"))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.api.key.as_deref(), Some("env-key"));
            assert_eq!(config.api.url, "https://global.example/v1/chat/completions");
            assert_eq!(config.history.max_history, 12);
            assert_eq!(config.api.model, "gpt-3.5-turbo");
            Ok(())
        });
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config_from(None, Path::new("does-not-exist.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.key = Some("sk-saved".to_string());
        config.history.max_history = 6;
        save_config(&config, Some(path.clone())).unwrap();

        let reloaded = load_config_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }
}
