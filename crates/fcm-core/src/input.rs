//! Input gate: decides whether a typed URL may be submitted for a check.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter a URL to check")]
    Empty,
}

/// Accept any string that is non-empty after trimming.
///
/// No scheme or format validation happens here; the scoring backend decides
/// what a URL is. The returned slice is the input exactly as typed.
pub fn validate(raw: &str) -> Result<&str, InputError> {
    if raw.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(raw)
}
