// Rendering of check results and the closing summary

use linkrot_scanner::CheckResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab separated lines: `<status>\t<url>` or `ERROR\t<url>\t<message>`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Totals of the check phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub checked: usize,
    pub elapsed: Duration,
}

impl CheckSummary {
    pub fn links_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.checked as f64 / seconds
        } else {
            0.0
        }
    }
}

pub fn format_check_result(result: &CheckResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => result.to_string(),
        // Serializing plain strings and integers can't fail
        OutputFormat::Json => serde_json::to_string(result).unwrap_or_else(|_| result.to_string()),
    }
}

pub fn format_summary(summary: &CheckSummary) -> String {
    format!(
        "Processed {} links in {:?} ({:.6} links per second)",
        summary.checked,
        summary.elapsed,
        summary.links_per_second()
    )
}
