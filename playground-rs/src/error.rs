use thiserror::Error;

/// Convenience alias used by every adapter entry point.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Failure taxonomy shared by the model client and the three adapters.
///
/// Adapters return these untranslated; how a failure is shown to the user
/// (raw message, fixed apology, structured record) is decided at the
/// presentation boundary, not here.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Missing or malformed deployment configuration, e.g. a blank API key.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input rejected before any model call was made.
    #[error("{0}")]
    Validation(String),

    /// The model answered, but with no usable text.
    #[error("{0}")]
    EmptyResponse(String),

    /// Transport failure or a non-success status from the model endpoint.
    #[error("{0}")]
    Service(String),

    /// The model's structured output did not decode to the expected shape.
    #[error("malformed model output: {0}")]
    SchemaViolation(String),
}
