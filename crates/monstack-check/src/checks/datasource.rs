//! Data-source provisioning check
//! (`grafana/provisioning/datasources/prometheus.yml`).

use crate::schema::{parse_yaml, DatasourceProvisioning};

use super::{ConfigCheck, SectionReport};

pub const EXPECTED_URL: &str = "http://prometheus:9090";

pub struct DatasourceCheck;

impl ConfigCheck for DatasourceCheck {
    fn name(&self) -> &'static str {
        "Grafana Datasource"
    }

    fn path(&self) -> &'static str {
        "grafana/provisioning/datasources/prometheus.yml"
    }

    fn max_points(&self) -> u32 {
        15
    }

    fn check(&self, content: &str) -> SectionReport {
        let mut s = SectionReport::new(self.name(), self.path(), self.max_points());

        let prov: DatasourceProvisioning = match parse_yaml(content) {
            Ok(p) => p,
            Err(e) => {
                s.fail("Valid YAML", e.to_string(), 0);
                return s;
            }
        };

        if prov.datasources.is_empty() {
            s.fail("Datasources defined", "Missing or commented", 0);
        } else {
            s.pass("Datasources defined", "", 3);
        }

        let prom = prov.by_type("prometheus");
        if prom.is_some() {
            s.pass("Prometheus type", "", 4);
        } else {
            s.fail("Prometheus type", "Missing or commented", 0);
        }

        // URL and default flag are judged on the prometheus source if any.
        let subject = prom.or_else(|| prov.datasources.first());

        let url = subject.and_then(|d| d.url.as_deref()).map(|u| u.trim_end_matches('/'));
        match url {
            Some(EXPECTED_URL) => s.pass("Prometheus URL", "", 4),
            Some(other) => s.fail("Prometheus URL", format!("Wrong ({other})"), 0),
            None => s.fail("Prometheus URL", "Missing", 0),
        }

        if subject.is_some_and(|d| d.is_default) {
            s.pass("Is default", "", 4);
        } else {
            s.fail("Is default", "Missing", 0);
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_config_scores_full() {
        let s = DatasourceCheck.check(
            r#"
apiVersion: 1
datasources:
  - name: Prometheus
    type: prometheus
    access: proxy
    url: "http://prometheus:9090/"
    isDefault: true
"#,
        );
        assert_eq!(s.points, 15, "{s:#?}");
    }

    #[test]
    fn commented_template() {
        let s = DatasourceCheck.check(
            "apiVersion: 1\ndatasources:\n  # - name: Prometheus\n  #   type: prometheus\n",
        );
        assert_eq!(s.points, 0);
        assert_eq!(s.item("Datasources defined").unwrap().detail, "Missing or commented");
    }

    #[test]
    fn wrong_url_and_not_default() {
        let s = DatasourceCheck.check(
            "datasources:\n  - name: P\n    type: prometheus\n    url: http://localhost:9090\n",
        );
        assert_eq!(s.points, 7);
        assert_eq!(s.item("Prometheus URL").unwrap().detail, "Wrong (http://localhost:9090)");
        assert!(!s.item("Is default").unwrap().passed);
    }
}
