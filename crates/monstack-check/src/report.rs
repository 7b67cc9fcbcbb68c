//! Scored report: totals plus terminal and JSON renderings.

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};
use serde::Serialize;

use monstack_core::error::{MonstackError, Result};

use crate::checks::SectionReport;

/// Cells in the progress bar; one cell per 5%.
pub const BAR_CELLS: u32 = 20;
/// Exit status of `--strict` runs that score below 100%.
pub const STRICT_FAILURE: u8 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sections: Vec<SectionReport>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total_points: u32,
    max_points: u32,
    percent: u32,
    complete: bool,
    sections: &'a [SectionReport],
}

impl Report {
    pub fn total_points(&self) -> u32 {
        self.sections.iter().map(|s| s.points).sum()
    }

    pub fn max_points(&self) -> u32 {
        self.sections.iter().map(|s| s.max_points).sum()
    }

    /// Integer percentage, rounded down.
    pub fn percent(&self) -> u32 {
        let max = self.max_points();
        if max == 0 {
            return 0;
        }
        self.total_points() * 100 / max
    }

    pub fn is_complete(&self) -> bool {
        self.percent() == 100
    }

    pub fn render_json(&self) -> Result<String> {
        let doc = JsonReport {
            total_points: self.total_points(),
            max_points: self.max_points(),
            percent: self.percent(),
            complete: self.is_complete(),
            sections: &self.sections,
        };
        serde_json::to_string_pretty(&doc)
            .map_err(|e| MonstackError::Internal(format!("report encode failed: {e}")))
    }

    pub fn render_text(&self, color: bool) -> String {
        let p = Painter { color };
        let mut out = banner(&p);
        let _ = writeln!(out, "  {}\n", p.bold("Checking your monitoring stack..."));

        for s in &self.sections {
            let icon = if s.is_complete() {
                p.paint("✅", Color::Green)
            } else {
                p.paint("⏳", Color::Yellow)
            };
            let _ = writeln!(
                out,
                "  {icon} {} ({}/{} points)",
                p.bold(&s.name),
                s.points,
                s.max_points
            );
            for item in &s.items {
                let mark = if item.passed {
                    p.paint("✓", Color::Green)
                } else {
                    p.paint("✗", Color::Red)
                };
                let detail = if item.detail.is_empty() {
                    String::new()
                } else {
                    format!(" - {}", item.detail)
                };
                let _ = writeln!(out, "      {mark} {}{detail}", item.name);
            }
            out.push('\n');
        }

        let pct = self.percent();
        let bar_color = if pct >= 80 { Color::Green } else { Color::Yellow };
        let _ = writeln!(out, "  {}", p.bold("Score:"));
        let _ = writeln!(
            out,
            "  {} {}/{} points ({pct}%)",
            p.paint(&progress_bar(pct), bar_color),
            self.total_points(),
            self.max_points()
        );
        out.push('\n');

        let closing = if pct == 100 {
            vec![
                ("🎉 All configs complete!", Color::Green),
                ("Run 'monstack-check --start' to launch the stack!", Color::Cyan),
            ]
        } else if pct >= 80 {
            vec![("Almost there! Check the items marked with ✗", Color::Green)]
        } else {
            vec![("Keep going! See README.md for guidance.", Color::Cyan)]
        };
        for (line, color) in closing {
            let _ = writeln!(out, "  {}", p.paint(line, color));
        }
        out
    }
}

/// Process exit status for a checked stack: [`STRICT_FAILURE`] when `strict`
/// is set and the score is below 100%, otherwise 0.
pub fn exit_code(report: &Report, strict: bool) -> u8 {
    if strict && !report.is_complete() {
        STRICT_FAILURE
    } else {
        0
    }
}

/// `█` for every full 5%, `░` for the rest.
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) / 5).min(BAR_CELLS) as usize;
    let empty = BAR_CELLS as usize - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

pub(crate) fn banner(p: &Painter) -> String {
    let rule = "═".repeat(60);
    format!(
        "\n{}\n  {}\n{}\n\n",
        p.paint(&rule, Color::Cyan),
        p.bold("📊 MONITORING STACK CHALLENGE"),
        p.paint(&rule, Color::Cyan)
    )
}

/// Applies ANSI styling only when colour output is enabled.
pub(crate) struct Painter {
    pub color: bool,
}

impl Painter {
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}
