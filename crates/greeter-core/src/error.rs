//! Handler error taxonomy.

/// Errors a request handler can produce.
///
/// `InvalidInput` is the caller's fault: the accumulated validation messages
/// travel with it and are safe to show. `Internal` is ours: the detail is
/// for the log, and the transport layer must surface only a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Validation rejected the request. Carries every violation found.
    InvalidInput(Vec<String>),
    /// An unexpected fault during processing.
    Internal(String),
}

impl HandlerError {
    /// All validation messages joined into one line.
    pub fn joined_messages(&self) -> String {
        match self {
            Self::InvalidInput(errors) => errors.join("; "),
            Self::Internal(detail) => detail.clone(),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(errors) => write!(f, "invalid request: {}", errors.join("; ")),
            Self::Internal(detail) => write!(f, "internal error: {}", detail),
        }
    }
}

impl std::error::Error for HandlerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_joins_messages() {
        let err = HandlerError::InvalidInput(vec!["too long".into(), "bad chars".into()]);
        assert_eq!(err.joined_messages(), "too long; bad chars");
        assert!(err.to_string().contains("invalid request"));
    }

    #[test]
    fn internal_display() {
        let err = HandlerError::Internal("boom".into());
        assert!(err.to_string().contains("internal error: boom"));
    }
}
