//! Shared application state.
//!
//! Built once at startup: resolves the registry contents and hands out
//! cheap clones to the router and the scheduler.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use promsynth_core::error::Result;
use promsynth_core::Registry;

use crate::bootstrap;
use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<Registry>,
}

struct AppStateInner {
    settings: Settings,
}

impl AppState {
    /// Build and populate a fresh registry.
    /// Returns Result so main can exit with a readable message.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let registry = Registry::new();
        bootstrap::populate(&registry, &settings, &mut StdRng::from_entropy())?;
        Ok(Self::with_registry(settings, Arc::new(registry)))
    }

    /// Wrap an already populated registry.
    pub fn with_registry(settings: Settings, registry: Arc<Registry>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { settings }),
            registry,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }
}
