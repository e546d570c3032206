use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Target;

/// Outcome of one target probe. Created once, never mutated; the optional
/// fields are omitted from JSON so a failed entry carries only the error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub site: String,
    pub url: String,
    pub accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn success(
        target: &Target,
        status_code: u16,
        response_time_seconds: f64,
        content_size_bytes: u64,
    ) -> Self {
        Self {
            site: target.name.clone(),
            url: target.url.clone(),
            accessible: true,
            status_code: Some(status_code),
            response_time_seconds: Some(response_time_seconds),
            content_size_bytes: Some(content_size_bytes),
            error: None,
        }
    }

    pub fn failure(target: &Target, error: impl Into<String>) -> Self {
        Self {
            site: target.name.clone(),
            url: target.url.clone(),
            accessible: false,
            status_code: None,
            response_time_seconds: None,
            content_size_bytes: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestInfo {
    pub timestamp: DateTime<Utc>,
    pub runner_ip: String,
    pub runtime_version: String,
}

/// Target metadata echoed into the report for readers without the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl From<&Target> for SiteInfo {
    fn from(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            description: target.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_tested: usize,
    pub successful: usize,
    pub failed: usize,
    pub all_accessible: bool,
}

impl Summary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let total_tested = results.len();
        let successful = results.iter().filter(|r| r.accessible).count();
        Self {
            total_tested,
            successful,
            failed: total_tested - successful,
            all_accessible: successful == total_tested,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub test_info: TestInfo,
    pub test_sites: Vec<SiteInfo>,
    pub results: Vec<ProbeResult>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetKind;

    fn target() -> Target {
        Target {
            name: "icon source".into(),
            url: "https://example.invalid/".into(),
            description: "test".into(),
            kind: TargetKind::Icons,
        }
    }

    #[test]
    fn summary_counts_add_up() {
        let results = vec![
            ProbeResult::success(&target(), 200, 0.12, 4096),
            ProbeResult::failure(&target(), "request timed out"),
        ];
        let summary = Summary::from_results(&results);
        assert_eq!(summary.total_tested, 2);
        assert_eq!(summary.successful + summary.failed, summary.total_tested);
        assert!(!summary.all_accessible);
    }

    #[test]
    fn all_accessible_iff_every_result_succeeded() {
        let all_up = vec![ProbeResult::success(&target(), 200, 0.1, 10)];
        assert!(Summary::from_results(&all_up).all_accessible);
        assert!(Summary::from_results(&[]).all_accessible);
    }

    #[test]
    fn failed_result_serializes_without_success_fields() {
        let json = serde_json::to_value(ProbeResult::failure(&target(), "connection error"))
            .expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.get("accessible"), Some(&serde_json::Value::Bool(false)));
        assert_eq!(obj.get("error").and_then(|v| v.as_str()), Some("connection error"));
        assert!(!obj.contains_key("status_code"));
        assert!(!obj.contains_key("response_time_seconds"));
        assert!(!obj.contains_key("content_size_bytes"));
    }

    #[test]
    fn successful_result_serializes_without_error_field() {
        let json = serde_json::to_value(ProbeResult::success(&target(), 200, 0.25, 1234))
            .expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.get("status_code").and_then(|v| v.as_u64()), Some(200));
        assert_eq!(obj.get("content_size_bytes").and_then(|v| v.as_u64()), Some(1234));
        assert!(!obj.contains_key("error"));
    }
}
