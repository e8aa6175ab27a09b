use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a run that passed every check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub target_url: String,
    /// Names of the checks that passed, in evaluation order.
    pub passed: Vec<String>,
    /// Screenshots written, in capture order.
    pub screenshots: Vec<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunReport {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            passed: Vec::new(),
            screenshots: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_field_names() {
        let mut report = RunReport::new("http://localhost:5173");
        report.passed.push("mute button".into());
        let json = report.finish().to_json_pretty().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["target_url"], "http://localhost:5173");
        assert_eq!(v["passed"][0], "mute button");
        assert!(v["finished_at"].is_string());
    }
}
