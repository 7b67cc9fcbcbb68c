//! Scrape configuration (`prometheus.yml`).

use std::collections::BTreeMap;

use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeConfigFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub global: GlobalSection,

    #[serde(default)]
    pub alerting: Option<AlertingSection>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_files: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scrape_configs: Vec<ScrapeJob>,
}

impl ScrapeConfigFile {
    pub fn job(&self, name: &str) -> Option<&ScrapeJob> {
        self.scrape_configs.iter().find(|j| j.job_name == name)
    }

    /// Alertmanager targets across every `alertmanagers` entry.
    pub fn alertmanager_targets(&self) -> Vec<&str> {
        self.alerting
            .iter()
            .flat_map(|a| &a.alertmanagers)
            .flat_map(|am| &am.static_configs)
            .flat_map(|sc| &sc.targets)
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalSection {
    #[serde(default)]
    pub scrape_interval: Option<String>,
    #[serde(default)]
    pub evaluation_interval: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertingSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alertmanagers: Vec<AlertmanagerEndpoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertmanagerEndpoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub static_configs: Vec<StaticConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeJob {
    pub job_name: String,
    #[serde(default)]
    pub scrape_interval: Option<String>,
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub static_configs: Vec<StaticConfig>,
}

impl ScrapeJob {
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.static_configs
            .iter()
            .flat_map(|sc| &sc.targets)
            .map(String::as_str)
    }
}

fn default_metrics_path() -> String {
    "/metrics".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
}

/// Job name to its targets, in declaration order per job.
pub fn scrape_targets(cfg: &ScrapeConfigFile) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for job in &cfg.scrape_configs {
        out.entry(job.job_name.clone())
            .or_default()
            .extend(job.targets().map(str::to_string));
    }
    out
}

/// `host:port` with a non-empty host and a valid port.
pub fn is_host_port(target: &str) -> bool {
    match target.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
