//! Metrics registry for the demo app.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Histogram sums are accumulated in nanoseconds and rendered in
//! seconds so the hot path stays on integer atomics.

use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use monstack_core::exposition::{format_value, write_header, write_sample, MetricKind};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, MetricKind::Counter);
        let mut rows: Vec<(LabelKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, val) in rows {
            write_sample(out, name, &key, None, val as f64);
        }
    }
}

#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn inc(&self) {
        self.add(1);
    }

    pub fn dec(&self) {
        self.add(-1);
    }

    pub fn add(&self, v: i64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, MetricKind::Gauge);
        write_sample(out, name, &[], None, self.get() as f64);
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_nanos: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

pub struct HistogramVec {
    bounds: Vec<f64>,
    // Pre-rendered `le` values, same order as `bounds`.
    bound_labels: Vec<String>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// `bounds` are upper bounds in seconds, strictly increasing.
    pub fn new(bounds: Vec<f64>) -> Self {
        let bound_labels = bounds.iter().map(|b| format_value(*b)).collect();
        Self { bounds, bound_labels, map: DashMap::new() }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let n = self.bounds.len();
        // `hist` holds the shard write lock until return; `render` reads a
        // series under the read lock, so it never sees a partial observation.
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::new(n));

        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_nanos.fetch_add(nanos, Ordering::Relaxed);

        // Cumulative buckets: increment every bucket whose bound covers the value.
        let secs = duration.as_secs_f64();
        for (bucket, &le) in hist.buckets.iter().zip(&self.bounds) {
            if secs <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for a label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, MetricKind::Histogram);

        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        let bucket_name = format!("{name}_bucket");
        let sum_name = format!("{name}_sum");
        let count_name = format!("{name}_count");

        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            for (bucket, le) in hist.buckets.iter().zip(&self.bound_labels) {
                let v = bucket.load(Ordering::Relaxed);
                write_sample(out, &bucket_name, &key, Some(("le", le)), v as f64);
            }
            let count = hist.count.load(Ordering::Relaxed);
            write_sample(out, &bucket_name, &key, Some(("le", "+Inf")), count as f64);

            let sum = hist.sum_nanos.load(Ordering::Relaxed) as f64 / 1e9;
            write_sample(out, &sum_name, &key, None, sum);
            write_sample(out, &count_name, &key, None, count as f64);
        }
    }
}

/// The three application metrics scraped by the metrics database.
pub struct AppMetrics {
    /// `method`, `status`, `endpoint`.
    pub http_requests_total: CounterVec,
    /// `endpoint`.
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_active: Gauge,
}

impl AppMetrics {
    pub fn new(latency_buckets: Vec<f64>) -> Self {
        Self {
            http_requests_total: CounterVec::default(),
            http_request_duration_seconds: HistogramVec::new(latency_buckets),
            http_requests_active: Gauge::default(),
        }
    }

    /// Render every family in exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests_total
            .render("http_requests_total", "Total HTTP requests", &mut out);
        self.http_request_duration_seconds
            .render("http_request_duration_seconds", "HTTP request latency", &mut out);
        self.http_requests_active
            .render("http_requests_active", "Active HTTP requests", &mut out);
        out
    }
}
