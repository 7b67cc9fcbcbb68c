//! Shared application state for the demo app.

use std::sync::Arc;

use monstack_core::error::Result;

use crate::config::AppConfig;
use crate::obs::AppMetrics;
use crate::services::{RandomSimulator, Simulator};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    metrics: AppMetrics,
    simulator: Arc<dyn Simulator>,
}

impl AppState {
    /// Build application state with the random simulator.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        Self::with_simulator(cfg, Arc::new(RandomSimulator))
    }

    /// Build application state with a caller-provided simulator.
    pub fn with_simulator(cfg: AppConfig, simulator: Arc<dyn Simulator>) -> Result<Self> {
        cfg.validate()?;
        let metrics = AppMetrics::new(cfg.metrics.latency_buckets.clone());
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metrics, simulator }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.inner.metrics
    }

    pub fn simulator(&self) -> &dyn Simulator {
        self.inner.simulator.as_ref()
    }
}
