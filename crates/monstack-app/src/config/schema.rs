use std::net::SocketAddr;

use monstack_core::error::{MonstackError, Result};
use serde::Deserialize;

/// Upper bound for any simulated delay.
const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub simulation: SimulationSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
            simulation: SimulationSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MonstackError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metrics.validate()?;
        self.simulation.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            MonstackError::BadRequest(format!(
                "server.listen must be a valid socket address (got {:?})",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Histogram upper bounds in seconds.
    #[serde(default = "default_latency_buckets")]
    pub latency_buckets: Vec<f64>,

    /// Whether scrapes of `/metrics` count as application requests.
    #[serde(default)]
    pub track_metrics_endpoint: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            latency_buckets: default_latency_buckets(),
            track_metrics_endpoint: false,
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if self.latency_buckets.is_empty() {
            return Err(MonstackError::BadRequest(
                "metrics.latency_buckets must not be empty".into(),
            ));
        }
        if self.latency_buckets.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            return Err(MonstackError::BadRequest(
                "metrics.latency_buckets must be finite and greater than 0".into(),
            ));
        }
        if self.latency_buckets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MonstackError::BadRequest(
                "metrics.latency_buckets must be strictly increasing".into(),
            ));
        }
        Ok(())
    }
}

fn default_latency_buckets() -> Vec<f64> {
    vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    #[serde(default = "default_data_delay")]
    pub data_delay_ms: DelayRange,

    #[serde(default = "default_slow_delay")]
    pub slow_delay_ms: DelayRange,

    /// Probability that `/api/error` fails.
    #[serde(default = "default_error_rate")]
    pub error_rate: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            data_delay_ms: default_data_delay(),
            slow_delay_ms: default_slow_delay(),
            error_rate: default_error_rate(),
        }
    }
}

impl SimulationSection {
    pub fn validate(&self) -> Result<()> {
        self.data_delay_ms.validate("simulation.data_delay_ms")?;
        self.slow_delay_ms.validate("simulation.slow_delay_ms")?;
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(MonstackError::BadRequest(
                "simulation.error_rate must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Inclusive millisecond range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    fn validate(&self, field: &str) -> Result<()> {
        if self.min > self.max {
            return Err(MonstackError::BadRequest(format!(
                "{field}.min must not exceed {field}.max"
            )));
        }
        if self.max > MAX_DELAY_MS {
            return Err(MonstackError::BadRequest(format!(
                "{field}.max must be at most {MAX_DELAY_MS}"
            )));
        }
        Ok(())
    }
}

fn default_data_delay() -> DelayRange {
    DelayRange { min: 10, max: 100 }
}
fn default_slow_delay() -> DelayRange {
    DelayRange { min: 500, max: 2000 }
}
fn default_error_rate() -> f64 {
    0.5
}
