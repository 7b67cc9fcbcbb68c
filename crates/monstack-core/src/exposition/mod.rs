//! Prometheus text exposition format (0.0.4).
//!
//! - `format`: writers used by in-process registries to render samples.
//! - `parse`: a panic-free reader used to inspect rendered output.

pub mod format;
pub mod parse;

pub use format::{escape_label_value, format_labels, format_value, write_header, write_sample};
pub use parse::{parse_text, MetricFamily, MetricKind, Sample};

/// Content type served on the exposition endpoint.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
