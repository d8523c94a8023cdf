//! Engine loader for initializing engines from configuration

use super::local::LocalIndex;
use super::registry::EngineRegistry;
use super::traits::Engine;
use crate::config::{EngineConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing engines from configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Load all engines from settings
    pub fn load(settings: &Settings) -> Result<EngineRegistry> {
        let mut registry = EngineRegistry::new();

        for config in &settings.engines {
            if config.disabled {
                info!("Skipping disabled engine: {}", config.name);
                continue;
            }

            match Self::create_engine(config) {
                Ok(engine) => {
                    info!("Loaded engine: {} ({})", config.name, config.engine);
                    registry.register(engine, config.clone());
                }
                Err(e) => {
                    warn!("Failed to load engine {}: {}", config.name, e);
                }
            }
        }

        if settings.search.local_fallback {
            registry.set_fallback(Arc::new(|name: &str| {
                Arc::new(LocalIndex::new(name)) as Arc<dyn Engine>
            }));
        }

        info!(
            "Loaded {} engines: {}",
            registry.len(),
            registry.names().join(", ")
        );
        if registry.is_empty() {
            warn!("No engines available; every search will report its engines unresponsive");
        }
        Ok(registry)
    }

    /// Create an engine instance from its config
    fn create_engine(config: &EngineConfig) -> Result<Arc<dyn Engine>> {
        let name = config.name.trim().to_lowercase();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Engine name is empty"));
        }

        let engine: Arc<dyn Engine> = match config.engine.as_str() {
            "local" => Arc::new(LocalIndex::new(name)),
            other => {
                return Err(anyhow::anyhow!(
                    "Unknown engine type: {} (available: {})",
                    other,
                    Self::available_engines().join(", ")
                ));
            }
        };

        Ok(engine)
    }

    /// Get list of available engine types
    pub fn available_engines() -> Vec<&'static str> {
        vec!["local"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let registry = EngineLoader::load(&Settings::default()).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), vec!["bing", "duckduckgo", "google"]);
        assert!(registry.resolve("alpha").is_some());
    }

    #[test]
    fn test_skips_disabled_and_unknown() {
        let mut settings = Settings::default();
        settings.engines = vec![
            EngineConfig {
                name: "Alpha".to_string(),
                ..Default::default()
            },
            EngineConfig {
                name: "beta".to_string(),
                disabled: true,
                ..Default::default()
            },
            EngineConfig {
                name: "gamma".to_string(),
                engine: "scraper".to_string(),
                ..Default::default()
            },
        ];
        settings.search.local_fallback = false;

        let registry = EngineLoader::load(&settings).unwrap();
        assert_eq!(registry.names(), vec!["alpha"]);
        assert!(registry.resolve("beta").is_none());
        assert!(registry.resolve("gamma").is_none());
    }

    #[test]
    fn test_nothing_to_serve() {
        let mut settings = Settings::default();
        settings.engines.clear();
        settings.search.local_fallback = false;

        let registry = EngineLoader::load(&settings).unwrap();
        assert!(registry.is_empty());
        assert!(registry.resolve("google").is_none());
    }
}
