use std::path::PathBuf;

use form_forge_core::{CompileError, FieldErrors, OrderError};

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error
/// - 2: invalid arguments or input
/// - 3: a form definition does not compile
/// - 4: a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    GeneralError = 1,
    InvalidArguments = 2,
    CompileError = 3,
    Rejected = 4,
}

/// Errors returned by CLI command handlers.
///
/// Each variant maps to an `ExitCode` and can produce structured
/// output in JSON mode.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A single form definition failed to compile.
    #[error("{file}: {error}")]
    Compile {
        file: PathBuf,
        error: CompileError,
        source_text: String,
    },

    /// `check` found forms that do not compile; each was already reported.
    #[error("{failed} of {total} form files failed to compile")]
    CheckFailed { failed: usize, total: usize },

    /// The submission failed validation.
    #[error("submission rejected: {} field(s) failed validation", .errors.len())]
    Rejected { errors: FieldErrors },

    /// IO errors (file not found, permission denied).
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file is not valid JSON or not the expected shape.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Input that parsed but cannot be used, such as a submission that is
    /// not a JSON object.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// No form files at the given path.
    #[error("no form files found in {path}")]
    NoFormFiles { path: PathBuf },

    /// The named field is not part of the form.
    #[error("field '{name}' not found in {file}")]
    FieldNotFound { name: String, file: PathBuf },

    /// A reorder request was out of range.
    #[error("reorder failed: {0}")]
    Order(#[from] OrderError),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Compile { .. } | Self::CheckFailed { .. } => ExitCode::CompileError,
            Self::Rejected { .. } => ExitCode::Rejected,
            Self::Json { .. }
            | Self::InvalidInput { .. }
            | Self::Config { .. }
            | Self::NoFormFiles { .. }
            | Self::FieldNotFound { .. }
            | Self::Order(_) => ExitCode::InvalidArguments,
            Self::Io { .. } | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Compile { file, error, .. } => serde_json::json!({
                "error": "compile_error",
                "file": file.display().to_string(),
                "message": error.to_string(),
            }),
            Self::CheckFailed { failed, total } => serde_json::json!({
                "error": "compile_error",
                "failed": failed,
                "total": total,
            }),
            Self::Rejected { errors } => serde_json::json!({
                "error": "rejected",
                "errors": errors,
            }),
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Json { path, source } => serde_json::json!({
                "error": "invalid_json",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::InvalidInput { message } => serde_json::json!({
                "error": "invalid_input",
                "message": message,
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
