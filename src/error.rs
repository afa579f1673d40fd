//! Error type shared by every binarization stage

/// Failure raised by validation or by an internal consistency check
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinarizeError {
    /// A parameter, kernel or image did not satisfy a precondition
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// An intermediate result violated a postcondition
    #[error("internal error: {0}")]
    Internal(String),
}

impl BinarizeError {
    pub(crate) fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument(message.into())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for caller errors, false for engine bugs
    pub fn is_bad_argument(&self) -> bool {
        matches!(self, Self::BadArgument(_))
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, BinarizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BinarizeError::bad_argument("kernel size is empty");
        assert_eq!(err.to_string(), "bad argument: kernel size is empty");
        assert!(err.is_bad_argument());

        let err = BinarizeError::internal("padded size mismatch");
        assert_eq!(err.to_string(), "internal error: padded size mismatch");
        assert!(!err.is_bad_argument());
    }
}
