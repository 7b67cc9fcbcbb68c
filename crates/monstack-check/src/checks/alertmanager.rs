//! Alert routing check (`alertmanager/alertmanager.yml`).

use crate::schema::{parse_duration, parse_yaml, AlertmanagerConfig};

use super::{ConfigCheck, SectionReport};

pub struct AlertmanagerCheck;

impl ConfigCheck for AlertmanagerCheck {
    fn name(&self) -> &'static str {
        "Alertmanager"
    }

    fn path(&self) -> &'static str {
        "alertmanager/alertmanager.yml"
    }

    fn max_points(&self) -> u32 {
        20
    }

    fn check(&self, content: &str) -> SectionReport {
        let mut s = SectionReport::new(self.name(), self.path(), self.max_points());

        let cfg: AlertmanagerConfig = match parse_yaml(content) {
            Ok(c) => c,
            Err(e) => {
                s.fail("Valid YAML", e.to_string(), 0);
                return s;
            }
        };

        match &cfg.route {
            Some(route) => match route.receiver.as_deref() {
                Some(r) if !r.is_empty() => s.pass("Route configured", format!("receiver {r}"), 5),
                _ => s.fail("Route configured", "Route has no receiver", 0),
            },
            None => s.fail("Route configured", "Missing", 0),
        }

        if cfg.receivers.is_empty() {
            s.fail("Receivers defined", "Missing", 0);
        } else {
            let names: Vec<&str> = cfg.receivers.iter().map(|r| r.name.as_str()).collect();
            s.pass("Receivers defined", names.join(", "), 5);
        }

        match cfg.route.as_ref().map(|r| &r.group_by) {
            Some(g) if !g.is_empty() => s.pass("Group by configured", g.join(", "), 5),
            _ => s.fail("Group by configured", "Missing", 0),
        }

        if cfg.inhibit_rules.is_empty() {
            s.fail("Inhibit rules", "Missing", 0);
        } else {
            s.pass("Inhibit rules", format!("{} rule(s)", cfg.inhibit_rules.len()), 5);
        }

        if cfg.route.is_some() {
            let missing = cfg.undefined_receivers();
            if missing.is_empty() {
                s.advise("Route receivers defined", true, "");
            } else {
                let detail = format!("Undefined: {}", missing.join(", "));
                s.advise("Route receivers defined", false, detail);
            }

            let bad: Vec<String> = cfg
                .route
                .iter()
                .flat_map(|r| r.timings())
                .filter(|(_, v)| parse_duration(v).is_err())
                .map(|(field, v)| format!("{field}={v}"))
                .collect();
            if bad.is_empty() {
                s.advise("Route timings valid", true, "");
            } else {
                s.advise("Route timings valid", false, bad.join(", "));
            }
        }

        s
    }
}
