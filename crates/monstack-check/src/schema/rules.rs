//! Alerting/recording rule files (`rules/*.yml`).

use std::collections::BTreeMap;

use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<RuleGroup>,
}

impl RuleFile {
    /// Alerting rules with their group, skipping recording rules.
    pub fn alerts(&self) -> impl Iterator<Item = (&RuleGroup, &Rule)> {
        self.groups
            .iter()
            .flat_map(|g| g.rules.iter().map(move |r| (g, r)))
            .filter(|(_, r)| r.alert.is_some())
    }

    pub fn alert(&self, name: &str) -> Option<&Rule> {
        self.alerts()
            .map(|(_, r)| r)
            .find(|r| r.alert.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub alert: Option<String>,
    #[serde(default)]
    pub record: Option<String>,
    #[serde(default)]
    pub expr: String,
    /// Pending duration before firing.
    #[serde(default, rename = "for")]
    pub for_: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
}

impl Rule {
    pub fn severity(&self) -> Option<&str> {
        self.labels.get("severity").map(String::as_str)
    }
}
