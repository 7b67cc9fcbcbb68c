//! Alert routing configuration (`alertmanager.yml`).

use std::collections::BTreeMap;

use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertmanagerConfig {
    #[serde(default)]
    pub route: Option<Route>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub receivers: Vec<Receiver>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inhibit_rules: Vec<InhibitRule>,
}

impl AlertmanagerConfig {
    pub fn receiver(&self, name: &str) -> Option<&Receiver> {
        self.receivers.iter().find(|r| r.name == name)
    }

    /// Receivers referenced by the route tree that are not defined.
    pub fn undefined_receivers(&self) -> Vec<String> {
        let mut referenced = Vec::new();
        if let Some(route) = &self.route {
            route.collect_receivers(&mut referenced);
        }
        let mut missing: Vec<String> = referenced
            .into_iter()
            .filter(|name| self.receiver(name).is_none())
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub group_wait: Option<String>,
    #[serde(default)]
    pub group_interval: Option<String>,
    #[serde(default)]
    pub repeat_interval: Option<String>,
    #[serde(default, rename = "match", deserialize_with = "null_as_default")]
    pub match_: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_re: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matchers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routes: Vec<Route>,
}

impl Route {
    fn collect_receivers<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(r) = &self.receiver {
            out.push(r);
        }
        for child in &self.routes {
            child.collect_receivers(out);
        }
    }

    /// `(field, value)` for every timing field set anywhere in the tree.
    pub fn timings(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        self.collect_timings(&mut out);
        out
    }

    fn collect_timings<'a>(&'a self, out: &mut Vec<(&'static str, &'a str)>) {
        let fields = [
            ("group_wait", &self.group_wait),
            ("group_interval", &self.group_interval),
            ("repeat_interval", &self.repeat_interval),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                out.push((field, v.as_str()));
            }
        }
        for child in &self.routes {
            child.collect_timings(out);
        }
    }
}

/// A named receiver; notifier configs are kept opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct Receiver {
    pub name: String,
    #[serde(flatten)]
    pub notifiers: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InhibitRule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_match: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_match: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_matchers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_matchers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equal: Vec<String>,
}
