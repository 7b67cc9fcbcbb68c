//! Dashboard description check (`grafana/dashboards/app-dashboard.json`).

use crate::schema::{parse_json, Dashboard};

use super::{ConfigCheck, SectionReport};

/// Title shipped with the starter template.
pub const DEFAULT_TITLE: &str = "App Dashboard";
/// Marker left in starter queries.
pub const PLACEHOLDER: &str = "REPLACE_WITH";

const MIN_PANELS: usize = 4;

pub struct DashboardCheck;

impl ConfigCheck for DashboardCheck {
    fn name(&self) -> &'static str {
        "Grafana Dashboard"
    }

    fn path(&self) -> &'static str {
        "grafana/dashboards/app-dashboard.json"
    }

    fn max_points(&self) -> u32 {
        25
    }

    fn check(&self, content: &str) -> SectionReport {
        let mut s = SectionReport::new(self.name(), self.path(), self.max_points());

        let dashboard: Dashboard = match parse_json(content) {
            Ok(d) => d,
            Err(e) => {
                s.fail("Valid JSON", e.to_string(), 0);
                return s;
            }
        };
        s.pass("Valid JSON", "", 5);

        let panels = dashboard.leaf_panels().len();
        if panels >= MIN_PANELS {
            s.pass("4+ panels", format!("{panels} panels"), 5);
        } else {
            s.fail("4+ panels", format!("Only {panels} panels"), 0);
        }

        let mut real = 0usize;
        let mut placeholders = 0usize;
        for expr in dashboard.targets().iter().filter_map(|t| t.expr.as_deref()) {
            if expr.contains(PLACEHOLDER) {
                placeholders += 1;
            } else if !expr.trim().is_empty() {
                real += 1;
            }
        }
        match (real, placeholders) {
            (0, _) => s.fail("Real PromQL queries", "No real queries", 0),
            (_, 0) => s.pass("Real PromQL queries", "All panels have queries", 10),
            (_, n) => s.fail("Real PromQL queries", format!("{n} placeholders remaining"), 5),
        }

        match dashboard.title.as_deref() {
            Some(t) if !t.is_empty() && t != DEFAULT_TITLE => s.pass("Custom title", t, 5),
            _ => s.fail("Custom title", "Using default title", 2),
        }

        s
    }
}
