//! Application state shared across handlers

use crate::config::Settings;
use crate::engines::EngineRegistry;
use crate::quality::QualityClient;
use crate::search::Dispatcher;
use std::sync::Arc;

/// Shared application state
///
/// Everything here is read-only after startup; no request mutates it.
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Engine fan-out
    pub dispatcher: Arc<Dispatcher>,
    /// Quality service client
    pub quality: QualityClient,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: EngineRegistry) -> anyhow::Result<Self> {
        let dispatcher = Dispatcher::new(Arc::new(registry), &settings.search);
        let quality = QualityClient::new(&settings.quality)?;

        Ok(Self {
            settings: Arc::new(settings),
            dispatcher: Arc::new(dispatcher),
            quality,
        })
    }
}
