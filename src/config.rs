use crate::browser::BrowserConfig;
use crate::urls::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub categories: CategoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Origin every catalog URL is built from and relative links resolve against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CategoryConfig {
    /// How long a scraped name -> id map is reused. 0 rebuilds it on every call.
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

impl Default for SiteConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl CategoryConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring {}: {}", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
