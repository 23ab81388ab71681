use thiserror::Error;

/// The one error type for the client core.
///
/// Every failure is caught at the flow boundary (`flow` module) and converted
/// to a static user-facing string there; nothing propagates past a flow and
/// nothing is retried automatically. Diagnostic detail goes to tracing only.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Missing required input, caught before any network request is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The service answered with a non-success HTTP status.
    /// The body is not read in this case.
    #[error("Network response was not ok (status {0})")]
    Network(u16),

    /// The request could not complete at all (connect, DNS, broken pipe).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service replied 200 but carried an `error` field instead of output.
    #[error("Service error: {0}")]
    Service(String),

    /// Any failure while submitting or decoding a batch. Wraps the underlying
    /// cause as a string; the batch flow discards partial output on failure.
    #[error("Batch processing failed: {0}")]
    Batch(String),
}

impl FlowError {
    /// Wraps any flow error into the batch variant, preserving the cause text.
    /// The batch contract collapses every failure kind into one retryable error.
    pub fn into_batch(self) -> FlowError {
        match self {
            FlowError::Validation(_) | FlowError::Batch(_) => self,
            other => FlowError::Batch(other.to_string()),
        }
    }
}
