use thiserror::Error;

/// Errors returned by database queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtntError {
    /// A group, purpose or model id outside the known vocabulary.
    #[error("invalid {kind} \"{value}\"; valid values are {valid}, or lists of those")]
    InvalidSelector {
        kind: &'static str,
        value: String,
        valid: String,
    },

    /// Malformed structural input (out-of-range ids, unparseable stems).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl AtntError {
    pub(crate) fn selector(kind: &'static str, value: impl ToString, valid: impl Into<String>) -> Self {
        Self::InvalidSelector {
            kind,
            value: value.to_string(),
            valid: valid.into(),
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, AtntError>;
