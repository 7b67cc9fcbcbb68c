//! Exposition text reader (panic-free).
//!
//! Parsing rules:
//! - `# HELP` / `# TYPE` lines declare families; other comments are ignored.
//! - `_bucket`, `_sum`, `_count` samples attach to a declared histogram or
//!   summary family of the base name.
//! - Trailing timestamps are accepted and discarded.

use std::collections::HashMap;

use crate::error::{MonstackError, Result};

/// Metric type as declared by `# TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
            MetricKind::Untyped => "untyped",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            "histogram" => Ok(MetricKind::Histogram),
            "summary" => Ok(MetricKind::Summary),
            "untyped" => Ok(MetricKind::Untyped),
            other => Err(MonstackError::Parse(format!("unknown metric type: {other}"))),
        }
    }
}

/// One sample line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl Sample {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// All samples sharing a family name.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub name: String,
    pub help: Option<String>,
    pub kind: MetricKind,
    pub samples: Vec<Sample>,
}

impl MetricFamily {
    fn new(name: &str, kind: MetricKind) -> Self {
        Self { name: name.to_string(), help: None, kind, samples: Vec::new() }
    }

    /// First sample named `name` whose labels include every pair in `labels`.
    pub fn find(&self, name: &str, labels: &[(&str, &str)]) -> Option<&Sample> {
        self.samples.iter().find(|s| {
            s.name == name && labels.iter().all(|(k, v)| s.label(k) == Some(*v))
        })
    }
}

/// Parse exposition text into families, in order of first appearance.
pub fn parse_text(text: &str) -> Result<Vec<MetricFamily>> {
    let mut families: Vec<MetricFamily> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let mut parts = comment.trim_start().splitn(3, ' ');
            let directive = parts.next().unwrap_or_default();
            let name = parts.next().unwrap_or_default();
            let rest = parts.next().unwrap_or_default();
            match directive {
                "HELP" if !name.is_empty() => {
                    let i = family_slot(&mut families, &mut index, name, MetricKind::Untyped);
                    if let Some(f) = families.get_mut(i) {
                        f.help = Some(unescape_help(rest));
                    }
                }
                "TYPE" if !name.is_empty() => {
                    let kind = MetricKind::parse(rest.trim())?;
                    let i = family_slot(&mut families, &mut index, name, kind);
                    if let Some(f) = families.get_mut(i) {
                        f.kind = kind;
                    }
                }
                _ => {}
            }
            continue;
        }

        let sample = parse_sample(line)
            .map_err(|e| MonstackError::Parse(format!("line {}: {e}", lineno + 1)))?;
        let owner = owning_family(&families, &index, &sample.name);
        let i = match owner {
            Some(i) => i,
            None => family_slot(&mut families, &mut index, &sample.name, MetricKind::Untyped),
        };
        if let Some(f) = families.get_mut(i) {
            f.samples.push(sample);
        }
    }

    Ok(families)
}

fn family_slot(
    families: &mut Vec<MetricFamily>,
    index: &mut HashMap<String, usize>,
    name: &str,
    kind: MetricKind,
) -> usize {
    if let Some(&i) = index.get(name) {
        return i;
    }
    families.push(MetricFamily::new(name, kind));
    let i = families.len() - 1;
    index.insert(name.to_string(), i);
    i
}

fn owning_family(
    families: &[MetricFamily],
    index: &HashMap<String, usize>,
    name: &str,
) -> Option<usize> {
    if let Some(&i) = index.get(name) {
        return Some(i);
    }
    for suffix in ["_bucket", "_sum", "_count"] {
        let Some(base) = name.strip_suffix(suffix) else { continue };
        let Some(&i) = index.get(base) else { continue };
        let kind = families.get(i).map(|f| f.kind);
        let matches = match kind {
            Some(MetricKind::Histogram) => true,
            Some(MetricKind::Summary) => suffix != "_bucket",
            _ => false,
        };
        if matches {
            return Some(i);
        }
    }
    None
}

fn unescape_help(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn parse_sample(line: &str) -> std::result::Result<Sample, String> {
    let name_end = line
        .find(|c: char| c == '{' || c.is_whitespace())
        .ok_or_else(|| "sample without value".to_string())?;
    let (name, mut rest) = line.split_at(name_end);
    if !is_valid_name(name) {
        return Err(format!("invalid metric name: {name:?}"));
    }

    let mut labels = Vec::new();
    if let Some(after_brace) = rest.strip_prefix('{') {
        let (parsed, remaining) = parse_labels(after_brace)?;
        labels = parsed;
        rest = remaining;
    }

    let mut fields = rest.split_whitespace();
    let value_s = fields.next().ok_or_else(|| "missing value".to_string())?;
    let value: f64 = value_s.parse().map_err(|_| format!("invalid value: {value_s:?}"))?;
    if let Some(ts) = fields.next() {
        ts.parse::<i64>().map_err(|_| format!("invalid timestamp: {ts:?}"))?;
    }
    if fields.next().is_some() {
        return Err("trailing data after timestamp".into());
    }

    Ok(Sample { name: name.to_string(), labels, value })
}

/// Parse `k="v",...}`; returns the labels and the text after `}`.
fn parse_labels(s: &str) -> std::result::Result<(Vec<(String, String)>, &str), String> {
    let mut labels = Vec::new();
    let mut rest = s.trim_start();

    loop {
        if let Some(after) = rest.strip_prefix('}') {
            return Ok((labels, after));
        }

        let eq = rest.find('=').ok_or_else(|| "label without '='".to_string())?;
        let (key, after_key) = rest.split_at(eq);
        let key = key.trim();
        if !is_valid_name(key) {
            return Err(format!("invalid label name: {key:?}"));
        }
        let after_eq = after_key.get(1..).unwrap_or_default().trim_start();
        let body = after_eq
            .strip_prefix('"')
            .ok_or_else(|| format!("label {key} value must be quoted"))?;

        let mut value = String::new();
        let mut consumed = None;
        let mut chars = body.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, other)) => value.push(other),
                    None => break,
                },
                '"' => {
                    consumed = Some(i + 1);
                    break;
                }
                other => value.push(other),
            }
        }
        let consumed = consumed.ok_or_else(|| "unterminated label value".to_string())?;
        labels.push((key.to_string(), value));

        rest = body.get(consumed..).unwrap_or_default().trim_start();
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma.trim_start();
        } else if !rest.starts_with('}') {
            return Err("expected ',' or '}' in label set".into());
        }
    }
}

fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total{endpoint="home",method="GET",status="200"} 3
http_requests_total{endpoint="api_error",method="GET",status="500"} 1 1700000000000
# HELP http_request_duration_seconds HTTP request latency
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_bucket{endpoint="home",le="0.1"} 2
http_request_duration_seconds_bucket{endpoint="home",le="+Inf"} 3
http_request_duration_seconds_sum{endpoint="home"} 0.42
http_request_duration_seconds_count{endpoint="home"} 3
# TYPE http_requests_active gauge
http_requests_active 0
"#;

    #[test]
    fn parses_families_in_order() {
        let fams = parse_text(SAMPLE).unwrap();
        let names: Vec<&str> = fams.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["http_requests_total", "http_request_duration_seconds", "http_requests_active"]
        );
        assert_eq!(fams[0].kind, MetricKind::Counter);
        assert_eq!(fams[0].help.as_deref(), Some("Total HTTP requests"));
        assert_eq!(fams[1].samples.len(), 4);
        assert_eq!(fams[2].kind, MetricKind::Gauge);
        assert!(fams[2].help.is_none());
    }

    #[test]
    fn finds_samples_by_labels() {
        let fams = parse_text(SAMPLE).unwrap();
        let s = fams[0]
            .find("http_requests_total", &[("status", "500")])
            .unwrap();
        assert_eq!(s.label("endpoint"), Some("api_error"));
        assert_eq!(s.value, 1.0);

        let inf = fams[1]
            .find("http_request_duration_seconds_bucket", &[("le", "+Inf")])
            .unwrap();
        assert_eq!(inf.value, 3.0);
    }

    #[test]
    fn escaped_label_values() {
        let fams = parse_text("x{p=\"a\\\"b\\\\c\\nd\",} 1\n").unwrap();
        assert_eq!(fams[0].samples[0].label("p"), Some("a\"b\\c\nd"));
    }

    #[test]
    fn untyped_suffix_is_its_own_family() {
        let fams = parse_text("foo_count 2\n").unwrap();
        assert_eq!(fams[0].name, "foo_count");
        assert_eq!(fams[0].kind, MetricKind::Untyped);
    }

    #[test]
    fn rejects_malformed() {
        for bad in [
            "x{a=\"1\" 2\n",
            "x{a=1} 2\n",
            "x notanumber\n",
            "x\n",
            "1x 2\n",
            "x 1 2 3\n",
            "# TYPE x sometype\n",
        ] {
            let err = parse_text(bad).expect_err(bad);
            assert_eq!(err.code().as_str(), "PARSE", "input={bad:?}");
        }
    }

    #[test]
    fn special_values() {
        let fams = parse_text("a +Inf\nb -Inf\nc NaN\n").unwrap();
        assert!(fams[0].samples[0].value.is_infinite());
        assert!(fams[1].samples[0].value < 0.0);
        assert!(fams[2].samples[0].value.is_nan());
    }
}
