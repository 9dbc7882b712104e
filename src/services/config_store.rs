// Configuration Storage Service
// Handles config file read/write and environment overrides

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
const DEFAULT_TIMEOUT_SECS: u64 = 80;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            provider: ProviderConfig::default(),
            proxy: None,
            tools: ToolsConfig::default(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: default_model(),
            api_version: default_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    pub enabled: bool,
    pub url: Option<String>,
}

impl ProxyConfig {
    /// Proxy URL to use, if the proxy is enabled and has one.
    pub fn active_url(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Sampling parameters sent with one tool's prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(default)]
    pub top_p: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    #[serde(default = "default_humanize")]
    pub humanize: GenerationConfig,
    #[serde(default = "default_ai_detection")]
    pub ai_detection: GenerationConfig,
    #[serde(default = "default_plagiarism")]
    pub plagiarism: GenerationConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            humanize: default_humanize(),
            ai_detection: default_ai_detection(),
            plagiarism: default_plagiarism(),
        }
    }
}

fn default_version() -> String { "1.0.0".to_string() }
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_api_version() -> String { DEFAULT_API_VERSION.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_humanize() -> GenerationConfig {
    GenerationConfig { max_tokens: 256, temperature: 0.3, top_p: Some(0.9) }
}
fn default_ai_detection() -> GenerationConfig {
    GenerationConfig { max_tokens: 600, temperature: 0.2, top_p: None }
}
fn default_plagiarism() -> GenerationConfig {
    GenerationConfig { max_tokens: 800, temperature: 0.2, top_p: None }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Store backed by an explicit file path.
    pub fn with_file(config_file: PathBuf) -> Self {
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("textscope"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load configuration from file; a missing file yields defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })?;

        let content = serde_json::to_string_pretty(config)?;

        fs::write(&self.config_file, content).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })
    }

    /// Load and apply `TEXTSCOPE_*` environment overrides.
    pub fn load_with_env(&self) -> Result<AppConfig, ConfigError> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config);
        Ok(config)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(url) = non_empty_env("TEXTSCOPE_API_URL") {
        config.provider.base_url = Some(url);
    }
    if let Some(model) = non_empty_env("TEXTSCOPE_MODEL") {
        config.provider.model = model;
    }
}

/// Resolve the API key: environment first, then the config file.
pub fn resolve_api_key(config: &AppConfig) -> Option<String> {
    ["TEXTSCOPE_API_KEY", "ANTHROPIC_API_KEY"]
        .iter()
        .find_map(|key| non_empty_env(key))
        .or_else(|| {
            config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
        })
}
