use std::fmt;

use form_forge_core::{CompileError, FieldErrors};

/// Errors from form and submission storage and the services built on it.
///
/// Uses `String` for identifiers so the error stays `Clone` and cheap to
/// compare in tests.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BackendError {
    /// No form with this id is stored.
    FormNotFound { form_id: String },
    /// A form with this id is already stored.
    FormAlreadyExists { form_id: String },
    /// No submission with this id is stored.
    SubmissionNotFound { submission_id: String },
    /// The caller may not perform this action.
    Unauthorized { action: &'static str },
    /// The form definition does not compile.
    InvalidForm(CompileError),
    /// Internal or unexpected error.
    Internal { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormNotFound { form_id } => write!(f, "form '{form_id}' not found"),
            Self::FormAlreadyExists { form_id } => {
                write!(f, "form '{form_id}' already exists")
            }
            Self::SubmissionNotFound { submission_id } => {
                write!(f, "submission '{submission_id}' not found")
            }
            Self::Unauthorized { action } => write!(f, "not authorized to {action}"),
            Self::InvalidForm(e) => write!(f, "invalid form definition: {e}"),
            Self::Internal { message } => write!(f, "internal backend error: {message}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidForm(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CompileError> for BackendError {
    fn from(e: CompileError) -> Self {
        Self::InvalidForm(e)
    }
}

/// Outcome of a failed submission.
///
/// `Rejected` is the submitter's to fix; `Backend` is a system fault or a
/// missing form. The two never mix.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IntakeError {
    /// One or more fields failed validation.
    Rejected(FieldErrors),
    /// The form could not be loaded or compiled, or storage failed.
    Backend(BackendError),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(errors) => write!(f, "submission rejected: {errors}"),
            Self::Backend(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Rejected(_) => None,
        }
    }
}

impl From<BackendError> for IntakeError {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_not_found_display() {
        let err = BackendError::FormNotFound {
            form_id: "form_abc".into(),
        };
        assert_eq!(err.to_string(), "form 'form_abc' not found");
    }

    #[test]
    fn unauthorized_display() {
        let err = BackendError::Unauthorized {
            action: "delete forms",
        };
        assert_eq!(err.to_string(), "not authorized to delete forms");
    }

    #[test]
    fn invalid_form_wraps_compile_error() {
        let err: BackendError = CompileError::DuplicateFieldName("email".into()).into();
        assert!(err.to_string().contains("duplicate field name 'email'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rejected_display_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("state", "state is required");
        let err = IntakeError::Rejected(errors);
        assert_eq!(err.to_string(), "submission rejected: state: state is required");
    }

    #[test]
    fn backend_error_converts_into_intake_error() {
        let err: IntakeError = BackendError::Internal {
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, IntakeError::Backend(_)));
    }
}
