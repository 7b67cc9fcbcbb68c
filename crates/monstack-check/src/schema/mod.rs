//! Typed models of the third-party configuration formats.
//!
//! Models are lenient: unknown fields are ignored because the external tools
//! accept far more keys than the checker inspects. Collections tolerate an
//! explicit `null` (a key whose children are all commented out).

pub mod alertmanager;
pub mod duration;
pub mod grafana;
pub mod prometheus;
pub mod rules;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use monstack_core::error::{MonstackError, Result};

pub use alertmanager::{AlertmanagerConfig, InhibitRule, Receiver, Route};
pub use duration::parse_duration;
pub use grafana::{Dashboard, Datasource, DatasourceProvisioning, Panel, Target};
pub use prometheus::{scrape_targets, ScrapeConfigFile, ScrapeJob, StaticConfig};
pub use rules::{Rule, RuleFile, RuleGroup};

/// Parse a YAML document; a document with only comments yields `T::default()`.
pub fn parse_yaml<T: DeserializeOwned + Default>(s: &str) -> Result<T> {
    let has_content = s.lines().any(|l| {
        let t = l.trim();
        !t.is_empty() && !t.starts_with('#') && t != "---"
    });
    if !has_content {
        return Ok(T::default());
    }
    serde_yaml::from_str(s).map_err(|e| MonstackError::Parse(format!("invalid yaml: {e}")))
}

/// Parse a JSON document.
pub fn parse_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| MonstackError::Parse(format!("invalid json: {e}")))
}

pub(crate) fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
