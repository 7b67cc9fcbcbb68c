//! Alert rule check (`prometheus/rules/alerts.yml`).

use crate::schema::{parse_duration, parse_yaml, RuleFile};

use super::{ConfigCheck, SectionReport};

pub const REQUIRED_ALERTS: [&str; 4] =
    ["HighErrorRate", "HighLatency", "ServiceDown", "HighCPUUsage"];

pub struct AlertRulesCheck;

impl ConfigCheck for AlertRulesCheck {
    fn name(&self) -> &'static str {
        "Alert Rules"
    }

    fn path(&self) -> &'static str {
        "prometheus/rules/alerts.yml"
    }

    fn max_points(&self) -> u32 {
        20
    }

    fn check(&self, content: &str) -> SectionReport {
        let mut s = SectionReport::new(self.name(), self.path(), self.max_points());

        let rules: RuleFile = match parse_yaml(content) {
            Ok(r) => r,
            Err(e) => {
                s.fail("Valid YAML", e.to_string(), 0);
                return s;
            }
        };

        for name in REQUIRED_ALERTS {
            let item = format!("Alert: {name}");
            let Some(rule) = rules.alert(name) else {
                s.fail(item, "Missing", 0);
                continue;
            };
            if rule.expr.trim().is_empty() {
                s.fail(item, "Empty expr", 0);
                continue;
            }
            match rule.for_.as_deref().map(parse_duration) {
                Some(Err(e)) => s.fail(item, format!("Invalid for: {e}"), 0),
                _ => s.pass(item, "Configured", 5),
            }
        }

        let unlabelled: Vec<&str> = REQUIRED_ALERTS
            .iter()
            .filter_map(|name| rules.alert(name))
            .filter(|r| r.severity().is_none())
            .filter_map(|r| r.alert.as_deref())
            .collect();
        if unlabelled.is_empty() {
            s.advise("Severity labels", true, "");
        } else {
            s.advise("Severity labels", false, format!("Missing on {}", unlabelled.join(", ")));
        }

        s
    }
}
