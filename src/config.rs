use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

/// Tree store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the family tree JSON file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Whether sibling pairs survive the session (sidecar file). When false,
    /// sibling edges only live in the in-memory graph of the current session,
    /// uniformly across the CLI and web front ends.
    #[serde(default = "default_persist_siblings")]
    pub persist_siblings: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist_siblings: default_persist_siblings(),
        }
    }
}

/// Generation service (Ollama) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    #[serde(default = "default_ollama_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
            timeout_secs: default_ollama_timeout_secs(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            port: default_http_port(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("family_tree.json")
}

fn default_persist_siblings() -> bool {
    false
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "tinyllama".to_string()
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_http_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading
    /// config. Looks for the config file in this order:
    /// 1. Path specified in FAMTREE_CONFIG environment variable
    /// 2. ./famtree.toml in current directory
    ///
    /// A missing config file is not an error: every field has a default, so
    /// the tool runs without any configuration at all.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("FAMTREE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("famtree.toml"));

        let config = if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            toml::from_str::<Config>(&config_str).context("Failed to parse famtree.toml")?
        } else {
            Config::default()
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            anyhow::bail!("store.path must not be empty");
        }

        if self.ollama.model.trim().is_empty() {
            anyhow::bail!("ollama.model must not be empty");
        }

        if !self.ollama.base_url.starts_with("http://")
            && !self.ollama.base_url.starts_with("https://")
        {
            anyhow::bail!(
                "ollama.base_url must be an http(s) URL, got: {}",
                self.ollama.base_url
            );
        }

        if self.ollama.timeout_secs == 0 {
            anyhow::bail!("ollama.timeout_secs must be greater than 0");
        }

        if self.http_server.port == 0 {
            anyhow::bail!("http_server.port must be greater than 0");
        }

        Ok(())
    }

    /// Get the family tree storage path
    pub fn store_path(&self) -> &Path {
        &self.store.path
    }
}
