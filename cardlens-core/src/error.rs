//! Error taxonomy for statement processing.
//!
//! Callers see exactly three shapes: password required (recoverable by user
//! input), validation problems (caller-fixable), and everything else as one
//! generic processing failure whose detail stays server-side.

use thiserror::Error;

/// Failure of the end-to-end statement pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The document is encrypted and the password is missing or wrong.
    #[error("password required to open the statement")]
    PasswordRequired,

    /// Text extraction failed for a reason other than encryption.
    #[error("failed to extract text from the statement: {0}")]
    Extraction(String),

    /// The external model call failed (transport, quota, non-2xx status).
    #[error("external model call failed: {0}")]
    ExternalService(String),

    /// The model replied, but the reply did not parse into the expected shape.
    #[error("model reply did not match the expected shape: {0}")]
    MalformedResponse(String),

    /// The categorizer returned a different number of labels than the number
    /// of descriptions submitted. Positional zipping would be undefined, so
    /// this surfaces as an error rather than being silently repaired.
    #[error("categorizer returned {got} labels for {expected} descriptions")]
    CategoryCountMismatch { expected: usize, got: usize },
}

impl ProcessError {
    /// True when the caller can recover by prompting for a password.
    pub fn is_password_required(&self) -> bool {
        matches!(self, ProcessError::PasswordRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_required_is_recoverable() {
        assert!(ProcessError::PasswordRequired.is_password_required());
        assert!(!ProcessError::ExternalService("timeout".into()).is_password_required());
    }

    #[test]
    fn test_mismatch_message_names_both_counts() {
        let err = ProcessError::CategoryCountMismatch {
            expected: 4,
            got: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains('3'));
    }
}
