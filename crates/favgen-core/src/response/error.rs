//! Error type for API response parsing.

/// Message used when the service reports a failure without explaining it.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// Why a response body could not be turned into a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("no response from RealFaviconGenerator")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("cannot find parameter {0}")]
    MissingField(String),

    #[error("favicon generation failed: {0}")]
    GenerationFailed(String),
}
