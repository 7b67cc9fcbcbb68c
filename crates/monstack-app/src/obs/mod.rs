//! In-process metrics for the demo app.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler in
//! the text exposition format scraped by the metrics database.

pub mod metrics;

pub use metrics::{AppMetrics, CounterVec, Gauge, HistogramVec};
