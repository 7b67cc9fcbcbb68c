//! Scrape configuration check (`prometheus/prometheus.yml`).

use std::time::Duration;

use crate::schema::prometheus::is_host_port;
use crate::schema::{parse_duration, parse_yaml, ScrapeConfigFile};

use super::{ConfigCheck, SectionReport};

/// Jobs the stack must scrape.
pub const REQUIRED_JOBS: [&str; 3] = ["prometheus", "app", "node"];

const EXPECTED_INTERVAL: Duration = Duration::from_secs(15);

pub struct ScrapeConfigCheck;

impl ConfigCheck for ScrapeConfigCheck {
    fn name(&self) -> &'static str {
        "Prometheus Config"
    }

    fn path(&self) -> &'static str {
        "prometheus/prometheus.yml"
    }

    fn max_points(&self) -> u32 {
        20
    }

    fn check(&self, content: &str) -> SectionReport {
        let mut s = SectionReport::new(self.name(), self.path(), self.max_points());

        let cfg: ScrapeConfigFile = match parse_yaml(content) {
            Ok(c) => c,
            Err(e) => {
                s.fail("Valid YAML", e.to_string(), 0);
                return s;
            }
        };

        match cfg.global.scrape_interval.as_deref() {
            Some(v) if parse_duration(v).ok() == Some(EXPECTED_INTERVAL) => {
                s.pass("Scrape interval 15s", "Configured", 4)
            }
            Some(v) => s.fail("Scrape interval 15s", format!("Wrong value ({v})"), 2),
            None => s.fail("Scrape interval 15s", "Missing", 0),
        }

        let am = cfg.alertmanager_targets();
        if am.is_empty() {
            s.fail("Alertmanager config", "Missing or commented", 0);
        } else {
            s.pass("Alertmanager config", am.join(", "), 4);
        }

        for job in REQUIRED_JOBS {
            let name = format!("Job: {job}");
            match cfg.job(job) {
                Some(j) if j.targets().next().is_some() => {
                    let targets: Vec<&str> = j.targets().collect();
                    s.pass(name, targets.join(", "), 4);
                }
                Some(_) => s.fail(name, "No targets", 0),
                None => s.fail(name, "Missing or commented", 0),
            }
        }

        let bad: Vec<&str> = cfg
            .scrape_configs
            .iter()
            .flat_map(|j| j.targets())
            .chain(am.iter().copied())
            .filter(|t| !is_host_port(t))
            .collect();
        if bad.is_empty() {
            s.advise("Targets are host:port", true, "");
        } else {
            s.advise("Targets are host:port", false, bad.join(", "));
        }

        if cfg.rule_files.is_empty() {
            s.advise("Rule files referenced", false, "No rule_files; alert rules will not load");
        } else {
            s.advise("Rule files referenced", true, cfg.rule_files.join(", "));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = r#"
global:
  scrape_interval: 15s
  evaluation_interval: 15s
alerting:
  alertmanagers:
    - static_configs:
        - targets: ['alertmanager:9093']
rule_files:
  - /etc/prometheus/rules/*.yml
scrape_configs:
  - job_name: 'prometheus'
    static_configs:
      - targets: ['localhost:9090']
  - job_name: "app"
    static_configs:
      - targets: ['app:5000']
  - job_name: 'node'
    static_configs:
      - targets: ['node-exporter:9100']
"#;

    #[test]
    fn complete_config_scores_full() {
        let s = ScrapeConfigCheck.check(COMPLETE);
        assert_eq!(s.points, 20, "{s:#?}");
        assert!(s.items.iter().all(|i| i.passed));
    }

    #[test]
    fn template_with_commented_sections() {
        let template = r#"
global:
  scrape_interval: 1m
# alerting:
#   alertmanagers:
#     - static_configs:
#         - targets: ['alertmanager:9093']
scrape_configs:
  - job_name: 'prometheus'
    static_configs:
      - targets: ['localhost:9090']
  # - job_name: 'app'
  #   static_configs:
  #     - targets: ['app:5000']
"#;
        let s = ScrapeConfigCheck.check(template);
        // 2 partial for the interval, 4 for the prometheus job
        assert_eq!(s.points, 6);
        assert_eq!(s.item("Scrape interval 15s").unwrap().detail, "Wrong value (1m)");
        assert!(!s.item("Alertmanager config").unwrap().passed);
        assert!(s.item("Job: prometheus").unwrap().passed);
        assert_eq!(s.item("Job: app").unwrap().detail, "Missing or commented");
        assert!(!s.item("Rule files referenced").unwrap().passed);
    }

    #[test]
    fn equivalent_interval_spelling_counts() {
        let s = ScrapeConfigCheck.check("global:\n  scrape_interval: 15000ms\n");
        assert!(s.item("Scrape interval 15s").unwrap().passed);
    }

    #[test]
    fn job_without_targets_fails() {
        let s = ScrapeConfigCheck
            .check("scrape_configs:\n  - job_name: node\n    static_configs: []\n");
        assert_eq!(s.item("Job: node").unwrap().detail, "No targets");
        assert_eq!(s.item("Scrape interval 15s").unwrap().detail, "Missing");
    }

    #[test]
    fn invalid_yaml() {
        let s = ScrapeConfigCheck.check("scrape_configs: [unclosed\n");
        assert_eq!(s.points, 0);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].name, "Valid YAML");
    }

    #[test]
    fn malformed_target_is_advised() {
        let s = ScrapeConfigCheck.check(
            "scrape_configs:\n  - job_name: app\n    static_configs:\n      - targets: ['app']\n",
        );
        let item = s.item("Targets are host:port").unwrap();
        assert!(!item.passed);
        assert_eq!(item.detail, "app");
    }
}
