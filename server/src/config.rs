//! Server configuration loading and parsing
//!
//! TOML file (optional) with serde defaults, then environment overrides.
//! The provider credential comes only from `ANTHROPIC_API_KEY` and is
//! converted to a short-lived handle per generator call.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use appforge_pipeline::{ConfigError, Credential, GeneratorConfig};

const DEFAULT_CONFIG_PATH: &str = "appforge.toml";

/// Root server configuration.
#[derive(Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_db_path")]
    pub gallery_db_path: String,
    #[serde(default = "default_gallery_limit")]
    pub gallery_limit: usize,
    #[serde(default = "default_model")]
    pub generator_model: String,
    #[serde(default = "default_base_url")]
    pub generator_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub generator_timeout_secs: u64,

    /// Loaded from the environment, never from the file.
    #[serde(skip)]
    api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            gallery_db_path: default_db_path(),
            gallery_limit: default_gallery_limit(),
            generator_model: default_model(),
            generator_base_url: default_base_url(),
            generator_timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_db_path() -> String {
    "data/gallery.db".to_string()
}

fn default_gallery_limit() -> usize {
    50
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout_secs() -> u64 {
    25
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("gallery_db_path", &self.gallery_db_path)
            .field("gallery_limit", &self.gallery_limit)
            .field("generator_model", &self.generator_model)
            .field("generator_base_url", &self.generator_base_url)
            .field("generator_timeout_secs", &self.generator_timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration: `APPFORGE_CONFIG` path or `appforge.toml` if it
    /// exists, defaults otherwise; then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("APPFORGE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        let mut config = if Path::new(&path).exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            toml::from_str(&text).with_context(|| format!("Failed to parse config file: {path}"))?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("APPFORGE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Ok(model) = std::env::var("CLAUDE_MODEL") {
            self.generator_model = model;
        }
        self.api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// A credential handle for one generator call. The key itself is never
    /// logged, serialized, or echoed into any bundle.
    pub fn credential(&self) -> Result<Credential, ConfigError> {
        self.api_key
            .as_deref()
            .map(Credential::new)
            .ok_or(ConfigError::MissingCredential)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            base_url: self.generator_base_url.clone(),
            model: self.generator_model.clone(),
            timeout_secs: self.generator_timeout_secs,
            ..GeneratorConfig::default()
        }
    }
}
