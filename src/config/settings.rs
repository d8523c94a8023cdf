//! Settings structures for the gateway configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub quality: QualitySettings,
    pub search: SearchSettings,
    pub engines: Vec<EngineConfig>,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            quality: QualitySettings::default(),
            search: SearchSettings::default(),
            engines: default_engines(),
            ui: UiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (GATEWAY_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GATEWAY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("GATEWAY_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid GATEWAY_PORT: {}", val),
            }
        }
        if let Some(val) = lookup("GATEWAY_QUALITY_URL") {
            self.quality.url = val;
        }
        if let Some(val) = lookup("GATEWAY_REQUEST_TIMEOUT") {
            match val.parse() {
                Ok(secs) => self.server.request_timeout = secs,
                Err(_) => warn!("Ignoring invalid GATEWAY_REQUEST_TIMEOUT: {}", val),
            }
        }
        if let Some(val) = lookup("GATEWAY_QUALITY_TIMEOUT") {
            match val.parse() {
                Ok(secs) => self.quality.timeout = secs,
                Err(_) => warn!("Ignoring invalid GATEWAY_QUALITY_TIMEOUT: {}", val),
            }
        }
        if let Some(val) = lookup("GATEWAY_DEFAULT_ENGINES") {
            let engines: Vec<String> = val
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            if engines.is_empty() {
                warn!("Ignoring empty GATEWAY_DEFAULT_ENGINES");
            } else {
                self.search.default_engines = engines;
            }
        }
        if let Some(val) = lookup("GATEWAY_STATIC_DIR") {
            self.ui.static_dir = val;
        }
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.quality.url)
            .with_context(|| format!("invalid quality service url: {}", self.quality.url))?;

        check_seconds("server.request_timeout", self.server.request_timeout)?;
        check_seconds("quality.timeout", self.quality.timeout)?;
        check_seconds("search.engine_timeout", self.search.engine_timeout)?;
        for engine in &self.engines {
            if let Some(timeout) = engine.timeout {
                check_seconds(&format!("engines.{}.timeout", engine.name), timeout)?;
            }
        }

        if self.search.max_concurrency == 0 {
            bail!("search.max_concurrency must be at least 1");
        }

        // the request bound must leave room for the slowest engine plus the
        // quality round-trip, or callers get 408 where 502 is owed
        let slowest_engine = self
            .engines
            .iter()
            .filter(|e| !e.disabled)
            .filter_map(|e| e.timeout)
            .fold(self.search.engine_timeout, f64::max);
        let budget = slowest_engine + self.quality.timeout;
        if self.server.request_timeout <= budget {
            bail!(
                "server.request_timeout ({}s) must exceed the slowest engine timeout plus quality.timeout ({}s)",
                self.server.request_timeout,
                budget
            );
        }

        Ok(())
    }
}

fn check_seconds(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{} must be a positive number of seconds, got {}", field, value);
    }
    Ok(())
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Upper bound on a whole inbound request, in seconds
    pub request_timeout: f64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            request_timeout: 15.0,
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout)
    }
}

/// Quality-processing service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitySettings {
    /// Endpoint receiving `{query, results}`
    pub url: String,
    /// Total round-trip bound in seconds
    pub timeout: f64,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:5001/process".to_string(),
            timeout: 6.0,
        }
    }
}

impl QualitySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Engines used when a request names none
    pub default_engines: Vec<String>,
    /// Default language code
    pub default_lang: String,
    /// Default per-engine timeout in seconds
    pub engine_timeout: f64,
    /// Maximum number of engines queried at once
    pub max_concurrency: usize,
    /// Serve unlisted engine names from the local index
    pub local_fallback: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_engines: vec![
                "google".to_string(),
                "duckduckgo".to_string(),
                "bing".to_string(),
            ],
            default_lang: "en".to_string(),
            engine_timeout: 5.0,
            max_concurrency: 16,
            local_fallback: true,
        }
    }
}

/// Individual engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine name (unique identifier)
    pub name: String,
    /// Adapter type to use
    pub engine: String,
    /// Whether engine is disabled
    pub disabled: bool,
    /// Custom timeout for this engine
    pub timeout: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            engine: "local".to_string(),
            disabled: false,
            timeout: None,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Serve the bundled UI on `GET /*`
    pub enabled: bool,
    /// Directory holding the UI assets
    pub static_dir: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            static_dir: "ui".to_string(),
        }
    }
}

/// Default engine configurations
fn default_engines() -> Vec<EngineConfig> {
    ["google", "duckduckgo", "bing"]
        .into_iter()
        .map(|name| EngineConfig {
            name: name.to_string(),
            ..Default::default()
        })
        .collect()
}
