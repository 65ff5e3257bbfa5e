//! Normalized outcome of one URL scoring attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk classification. Stored and displayed as the label text
/// ("Safe", "Medium Risk", "High Risk", "Error: ...").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskStatus {
    Safe,
    MediumRisk,
    HighRisk,
    /// The check failed; carries a human-readable message.
    Error(String),
    /// A backend label that matches none of the above, kept verbatim.
    Unrecognized(String),
}

impl RiskStatus {
    /// Bucket a 0..=100 score: above 70 is high, above 40 is medium.
    pub fn from_score(score: u32) -> Self {
        if score > 70 {
            RiskStatus::HighRisk
        } else if score > 40 {
            RiskStatus::MediumRisk
        } else {
            RiskStatus::Safe
        }
    }

    /// Parse a backend or stored label. Matching ignores case, spaces, `-` and `_`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        let key: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "safe" => return RiskStatus::Safe,
            "mediumrisk" => return RiskStatus::MediumRisk,
            "highrisk" => return RiskStatus::HighRisk,
            _ => {}
        }
        // "Error", "Error: msg" or "Error msg"; not "Errorless".
        if let Some(prefix) = trimmed.get(..5) {
            let rest = &trimmed[5..];
            let delimited = rest.is_empty()
                || rest.starts_with(':')
                || rest.starts_with(char::is_whitespace);
            if prefix.eq_ignore_ascii_case("error") && delimited {
                let msg = rest.trim_start().trim_start_matches(':').trim();
                return RiskStatus::Error(msg.to_string());
            }
        }
        RiskStatus::Unrecognized(trimmed.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RiskStatus::Error(_))
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskStatus::Safe => write!(f, "Safe"),
            RiskStatus::MediumRisk => write!(f, "Medium Risk"),
            RiskStatus::HighRisk => write!(f, "High Risk"),
            RiskStatus::Error(msg) => write!(f, "Error: {}", msg),
            RiskStatus::Unrecognized(label) => write!(f, "{}", label),
        }
    }
}

impl From<String> for RiskStatus {
    fn from(s: String) -> Self {
        RiskStatus::from_label(&s)
    }
}

impl From<RiskStatus> for String {
    fn from(s: RiskStatus) -> Self {
        s.to_string()
    }
}

/// One URL check. Immutable once built; history stores these as JSON records
/// with camelCase keys (`url`, `score`, `status`, `createdAt`, `raw`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub url: String,
    pub score: Option<f64>,
    pub status: Option<RiskStatus>,
    pub created_at: DateTime<Utc>,
    /// Backend payload as received, when the result came from a remote call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl CheckResult {
    pub fn new(url: impl Into<String>, score: Option<f64>, status: Option<RiskStatus>) -> Self {
        Self {
            url: url.into(),
            score,
            status,
            created_at: Utc::now(),
            raw: None,
        }
    }

    /// A failed check: no score, `Error` status carrying `message`.
    pub fn error(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::new(url, None, Some(RiskStatus::Error(message.to_string())))
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn is_error(&self) -> bool {
        self.status.as_ref().is_some_and(RiskStatus::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(RiskStatus::from_score(0), RiskStatus::Safe);
        assert_eq!(RiskStatus::from_score(40), RiskStatus::Safe);
        assert_eq!(RiskStatus::from_score(41), RiskStatus::MediumRisk);
        assert_eq!(RiskStatus::from_score(70), RiskStatus::MediumRisk);
        assert_eq!(RiskStatus::from_score(71), RiskStatus::HighRisk);
        assert_eq!(RiskStatus::from_score(100), RiskStatus::HighRisk);
    }

    #[test]
    fn labels_parse_loosely() {
        assert_eq!(RiskStatus::from_label("High Risk"), RiskStatus::HighRisk);
        assert_eq!(RiskStatus::from_label("high_risk"), RiskStatus::HighRisk);
        assert_eq!(RiskStatus::from_label("MEDIUM-RISK"), RiskStatus::MediumRisk);
        assert_eq!(RiskStatus::from_label(" safe "), RiskStatus::Safe);
        assert_eq!(
            RiskStatus::from_label("Error: HTTP 500"),
            RiskStatus::Error("HTTP 500".to_string())
        );
        assert_eq!(
            RiskStatus::from_label("phishing"),
            RiskStatus::Unrecognized("phishing".to_string())
        );
    }

    #[test]
    fn error_label_needs_a_delimiter() {
        assert_eq!(RiskStatus::from_label("Error"), RiskStatus::Error(String::new()));
        assert_eq!(
            RiskStatus::from_label("error timeout"),
            RiskStatus::Error("timeout".to_string())
        );
        assert_eq!(
            RiskStatus::from_label("Errorless"),
            RiskStatus::Unrecognized("Errorless".to_string())
        );
        assert!(!RiskStatus::from_label("Errorless").is_error());
    }

    #[test]
    fn labels_display_like_the_dashboard() {
        assert_eq!(RiskStatus::MediumRisk.to_string(), "Medium Risk");
        assert_eq!(
            RiskStatus::Error("timeout".to_string()).to_string(),
            "Error: timeout"
        );
    }

    #[test]
    fn record_uses_camel_case_and_label_strings() {
        let r = CheckResult::new("https://a.test", Some(42.0), Some(RiskStatus::HighRisk));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["status"], "High Risk");
        assert_eq!(v["score"], 42.0);
        assert!(v.get("createdAt").is_some());
        assert!(v.get("raw").is_none());
    }

    #[test]
    fn reads_records_written_by_the_web_client() {
        let json = r#"{"url":"x.test","score":10,"status":"Safe","createdAt":"2025-03-01T10:00:00.000Z"}"#;
        let r: CheckResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.score, Some(10.0));
        assert_eq!(r.status, Some(RiskStatus::Safe));
        assert!(r.raw.is_none());
    }

    #[test]
    fn error_result_has_no_score() {
        let r = CheckResult::error("x", "boom");
        assert!(r.is_error());
        assert!(r.score.is_none());
    }
}
