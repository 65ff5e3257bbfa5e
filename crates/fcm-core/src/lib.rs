pub mod config;
pub mod logging;

pub mod dashboard;
pub mod history;
pub mod http;
pub mod input;
pub mod kv;
pub mod result;
pub mod scoring;
pub mod session;

pub use dashboard::{Dashboard, DashboardError};
pub use result::{CheckResult, RiskStatus};
