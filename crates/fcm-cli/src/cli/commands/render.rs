//! Text rendering shared by `check` and `history`.

use chrono::Local;
use fcm_core::{CheckResult, RiskStatus};

/// Whole scores print without a decimal point; missing ones as `-`.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s.fract() == 0.0 => format!("{}", s as i64),
        Some(s) => format!("{:.2}", s),
        None => "-".to_string(),
    }
}

pub fn format_status(status: Option<&RiskStatus>) -> String {
    status.map_or_else(|| "-".to_string(), ToString::to_string)
}

pub fn format_checked_at(result: &CheckResult) -> String {
    result
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn print_result(result: &CheckResult) {
    println!("{:<12} {}", "Website:", result.url);
    println!("{:<12} {}", "Risk score:", format_score(result.score));
    println!("{:<12} {}", "Status:", format_status(result.status.as_ref()));
}
