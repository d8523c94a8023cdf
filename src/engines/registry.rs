//! Engine registry for managing available search engines

use super::traits::Engine;
use crate::config::EngineConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds an engine for a name that has no registered adapter
pub type EngineFactory = Arc<dyn Fn(&str) -> Arc<dyn Engine> + Send + Sync>;

/// Registry of all available search engines
#[derive(Default)]
pub struct EngineRegistry {
    /// Engines by name
    engines: HashMap<String, Arc<dyn Engine>>,
    /// Engine configurations
    configs: HashMap<String, EngineConfig>,
    /// Adapter used for unlisted names
    fallback: Option<EngineFactory>,
}

impl EngineRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an engine
    pub fn register(&mut self, engine: Arc<dyn Engine>, config: EngineConfig) {
        let name = engine.name().to_string();
        self.engines.insert(name.clone(), engine);
        self.configs.insert(name, config);
    }

    /// Serve unlisted names through `factory`
    pub fn set_fallback(&mut self, factory: EngineFactory) {
        self.fallback = Some(factory);
    }

    /// Resolve a name to an engine, consulting the fallback for unlisted names
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Engine>> {
        self.engines
            .get(name)
            .cloned()
            .or_else(|| self.fallback.as_ref().map(|factory| factory(name)))
    }

    /// Registered engine names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// True when nothing is registered and no fallback is set
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty() && self.fallback.is_none()
    }

    /// Get effective timeout for an engine
    pub fn get_timeout(&self, engine: &dyn Engine, default: f64) -> f64 {
        self.configs
            .get(engine.name())
            .and_then(|c| c.timeout)
            .unwrap_or_else(|| engine.timeout().min(default))
    }
}
