//! Per-artifact checks and the registry that runs them against a stack
//! directory.
//!
//! Each check receives the file content (`None` when the file is missing)
//! and returns a scored `SectionReport`. Advisory items carry no points and
//! never affect the score.

pub mod alertmanager;
pub mod alerts;
pub mod dashboard;
pub mod datasource;
pub mod scrape;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::report::Report;

pub use alertmanager::AlertmanagerCheck;
pub use alerts::AlertRulesCheck;
pub use dashboard::DashboardCheck;
pub use datasource::DatasourceCheck;
pub use scrape::ScrapeConfigCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Scored,
    Advisory,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    pub name: String,
    pub passed: bool,
    pub detail: String,
    pub points: u32,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub name: String,
    pub file: String,
    pub points: u32,
    pub max_points: u32,
    pub items: Vec<CheckItem>,
}

impl SectionReport {
    pub fn new(name: &str, file: &str, max_points: u32) -> Self {
        Self {
            name: name.to_string(),
            file: file.to_string(),
            points: 0,
            max_points,
            items: Vec::new(),
        }
    }

    /// Passed item worth `points`.
    pub fn pass(&mut self, name: impl Into<String>, detail: impl Into<String>, points: u32) {
        self.push(name.into(), true, detail.into(), points, ItemKind::Scored);
    }

    /// Failed item, optionally with partial credit.
    pub fn fail(&mut self, name: impl Into<String>, detail: impl Into<String>, partial: u32) {
        self.push(name.into(), false, detail.into(), partial, ItemKind::Scored);
    }

    /// Unscored observation.
    pub fn advise(&mut self, name: impl Into<String>, passed: bool, detail: impl Into<String>) {
        self.push(name.into(), passed, detail.into(), 0, ItemKind::Advisory);
    }

    fn push(&mut self, name: String, passed: bool, detail: String, points: u32, kind: ItemKind) {
        self.points = (self.points + points).min(self.max_points);
        self.items.push(CheckItem { name, passed, detail, points, kind });
    }

    pub fn is_complete(&self) -> bool {
        self.points == self.max_points
    }

    pub fn item(&self, name: &str) -> Option<&CheckItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Section for a file that does not exist.
    pub fn missing(name: &str, file: &str, max_points: u32) -> Self {
        let mut s = Self::new(name, file, max_points);
        s.fail(format!("{} exists", file_name(file)), "File not found", 0);
        s
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// One artifact of the stack.
pub trait ConfigCheck: Send + Sync {
    /// Display name.
    fn name(&self) -> &'static str;
    /// Path relative to the stack directory.
    fn path(&self) -> &'static str;
    fn max_points(&self) -> u32;
    fn check(&self, content: &str) -> SectionReport;

    /// Score the artifact, or report it missing.
    fn evaluate(&self, content: Option<&str>) -> SectionReport {
        match content {
            Some(c) => self.check(c),
            None => SectionReport::missing(self.name(), self.path(), self.max_points()),
        }
    }
}

/// Built-in checks, in report order.
pub fn all_checks() -> Vec<Box<dyn ConfigCheck>> {
    vec![
        Box::new(ScrapeConfigCheck),
        Box::new(AlertmanagerCheck),
        Box::new(DatasourceCheck),
        Box::new(DashboardCheck),
        Box::new(AlertRulesCheck),
    ]
}

/// Run every check against `dir`.
pub fn run_all(dir: &Path) -> Report {
    let sections = all_checks()
        .iter()
        .map(|check| run_one(check.as_ref(), dir))
        .collect();
    Report { sections }
}

fn run_one(check: &dyn ConfigCheck, dir: &Path) -> SectionReport {
    let path = dir.join(check.path());
    match fs::read_to_string(&path) {
        Ok(content) => {
            let report = check.check(&content);
            tracing::debug!(
                file = %path.display(),
                points = report.points,
                max = report.max_points,
                "checked"
            );
            report
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(file = %path.display(), "missing");
            check.evaluate(None)
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "unreadable");
            let mut s = SectionReport::new(check.name(), check.path(), check.max_points());
            s.fail(format!("{} readable", file_name(check.path())), e.to_string(), 0);
            s
        }
    }
}
