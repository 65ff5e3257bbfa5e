//! Tolerant extraction of score/status from a scoring backend response.
//!
//! The backend schema is not fixed, so each field is looked up under several
//! aliases and the first non-null value wins.

use serde_json::Value;

use crate::result::RiskStatus;

/// `score` aliases, in lookup order.
const SCORE_PATHS: &[&[&str]] = &[&["result", "score"], &["score"], &["score_value"]];

/// `status` aliases, in lookup order.
const STATUS_PATHS: &[&[&str]] = &[&["result", "status"], &["status"], &["label"], &["verdict"]];

/// Fields pulled out of a backend payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// URL echoed by the backend, if any.
    pub url: Option<String>,
    pub score: Option<f64>,
    pub status: Option<RiskStatus>,
}

fn lookup<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(raw, |v, key| v.get(*key))
        .filter(|v| !v.is_null())
}

fn first_present<'a>(raw: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|p| lookup(raw, p))
}

fn as_score(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_status(v: &Value) -> Option<RiskStatus> {
    match v {
        Value::String(s) => Some(RiskStatus::from_label(s)),
        Value::Number(_) | Value::Bool(_) => Some(RiskStatus::from_label(&v.to_string())),
        _ => None,
    }
}

pub fn normalize(raw: &Value) -> Normalized {
    let score_value = first_present(raw, SCORE_PATHS);
    let score = score_value.and_then(as_score);
    if score.is_none() {
        if let Some(v) = score_value {
            tracing::warn!("score field is not numeric: {}", v);
        }
    }
    let status = first_present(raw, STATUS_PATHS).and_then(as_status);
    let url = raw
        .get("url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Normalized { url, score, status }
}
