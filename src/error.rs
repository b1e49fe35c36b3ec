use crate::domain::Field;

/// Message shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE: &str = "Failed to classify. Check that the backend is running.";

/// Message shown when a required field is empty at submission time.
pub const MISSING_FIELDS: &str = "Please fill in all fields";

/// Process-level error: a message plus the exit code `exo` terminates with.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Everything that can go wrong between pressing submit and showing a result.
///
/// Each variant reduces to one user-visible string via [`SubmitError::user_message`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("{}", MISSING_FIELDS)]
    MissingFields,
    #[error("{field} must be a finite number (got '{value}')")]
    InvalidNumber { field: Field, value: String },
    /// Network failure or non-2xx response.
    #[error("{0}")]
    Request(String),
    /// Body was not the JSON we expected.
    #[error("{0}")]
    MalformedResponse(String),
}

impl SubmitError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitError::MissingFields | SubmitError::InvalidNumber { .. })
    }

    /// The string stored in session state; never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            msg
        }
    }

    /// Lift into a process error for one-shot CLI commands.
    pub fn into_app_error(self) -> AppError {
        let code = if self.is_validation() { 2 } else { 4 };
        AppError::new(code, self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_is_exact() {
        assert_eq!(SubmitError::MissingFields.user_message(), "Please fill in all fields");
        assert_eq!(SubmitError::MissingFields.to_string(), MISSING_FIELDS);
    }

    #[test]
    fn empty_failure_message_falls_back_to_generic() {
        assert_eq!(SubmitError::Request(String::new()).user_message(), GENERIC_FAILURE);
        assert_eq!(SubmitError::MalformedResponse("  ".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(SubmitError::Request("boom".into()).user_message(), "boom");
    }

    #[test]
    fn exit_codes_split_validation_from_runtime() {
        assert_eq!(SubmitError::MissingFields.into_app_error().exit_code(), 2);
        assert_eq!(SubmitError::Request("x".into()).into_app_error().exit_code(), 4);
    }
}
