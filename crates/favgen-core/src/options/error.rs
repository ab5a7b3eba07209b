//! Error type for option validation.

/// Why a set of raw generation options was rejected.
///
/// Raised before any network call; the caller fixes the input and retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required option \"{0}\"")]
    MissingRequiredOption(String),

    #[error("option \"{name}\" must be of type {expected}, got {actual}")]
    InvalidOptionType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("option \"{name}\" has invalid value {value} (allowed: {allowed})")]
    InvalidOptionValue {
        name: String,
        value: String,
        allowed: String,
    },

    #[error("unknown option \"{0}\"")]
    UnknownOption(String),
}

impl ValidationError {
    /// Name of the offending option.
    pub fn option_name(&self) -> &str {
        match self {
            ValidationError::MissingRequiredOption(name)
            | ValidationError::UnknownOption(name)
            | ValidationError::InvalidOptionType { name, .. }
            | ValidationError::InvalidOptionValue { name, .. } => name,
        }
    }
}
