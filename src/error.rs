//! Error types for the visibility engine.

/// Result type for engine operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for engine operations.
///
/// `SunEventRange` signals an internal invariant violation (the precomputed
/// sun event margin was insufficient) and is never a user-input problem;
/// callers should abort the whole request when they see it.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Sun event query at JD {jd:.5} outside built range [{start:.5}, {end:.5}]")]
    SunEventRange { jd: f64, start: f64, end: f64 },

    #[error("No {event} crossing of elevation {horizon_deg}° within {span_days} days after JD {after:.5}")]
    NoCrossing {
        event: &'static str,
        horizon_deg: f64,
        span_days: f64,
        after: f64,
    },

    #[error("Unknown observatory id: {0}")]
    UnknownObservatory(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for CoreError {
    fn from(s: String) -> Self {
        CoreError::InternalError(s)
    }
}

impl From<&str> for CoreError {
    fn from(s: &str) -> Self {
        CoreError::InternalError(s.to_string())
    }
}

impl CoreError {
    /// True for errors that indicate a broken internal invariant rather than
    /// bad user input. These abort the request instead of being collected.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CoreError::SunEventRange { .. } | CoreError::InternalError(_)
        )
    }
}
