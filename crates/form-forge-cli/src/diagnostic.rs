use form_forge_core::{CompileError, DependencyFault};
use miette::{Diagnostic, NamedSource, SourceSpan};
use regex::Regex;

/// A diagnostic wrapping a `CompileError` for rich miette rendering.
///
/// Compile errors carry field names, not positions, so the span is found by
/// searching the form's JSON text for the offending key.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct CompileDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

/// Convert a `CompileError` into a miette `CompileDiagnostic`.
pub fn compile_error_to_diagnostic(
    error: &CompileError,
    source: &str,
    filename: &str,
) -> CompileDiagnostic {
    let (span, label, suggestion) = match error {
        CompileError::EmptyTitle => (
            find_key(source, "title", 0),
            "empty title".to_string(),
            Some("Give the form a title.".to_string()),
        ),
        CompileError::EmptyDescription => (
            find_key(source, "description", 0),
            "empty description".to_string(),
            Some("Describe what the form is for.".to_string()),
        ),
        CompileError::EmptyFields => (
            find_key(source, "fields", 0),
            "no fields".to_string(),
            Some("Add at least one field definition.".to_string()),
        ),
        CompileError::DuplicateFieldName(name) => {
            let first = find_field(source, name, 0);
            let second = first.and_then(|(start, len)| find_field(source, name, start + len));
            (
                second.or(first),
                "already defined above".to_string(),
                Some("Remove the duplicate or rename one of the fields.".to_string()),
            )
        }
        CompileError::MissingOptions(name) => (
            find_field(source, name, 0),
            "radio and select fields need options".to_string(),
            Some("Add an \"options\" list with at least one entry.".to_string()),
        ),
        CompileError::InvalidRange { field, min, max } => (
            find_field(source, field, 0),
            "min must be <= max".to_string(),
            Some(format!(
                "Swap the bounds: \"validation\": {{\"min\": {max}, \"max\": {min}}}"
            )),
        ),
        CompileError::InvalidPattern { field, .. } => (
            find_field(source, field, 0),
            "pattern does not compile".to_string(),
            Some("Check the regex syntax; backslashes must be doubled in JSON.".to_string()),
        ),
        CompileError::InvalidDependency {
            field,
            depends_on,
            fault,
        } => {
            let after = find_field(source, field, 0).map_or(0, |(start, _)| start);
            let span = find_pair(source, "dependsOn", depends_on, after)
                .or_else(|| find_field(source, field, 0));
            (span, fault.to_string(), dependency_suggestion(*fault, depends_on))
        }
        _ => (None, "error".to_string(), None),
    };

    CompileDiagnostic {
        src: NamedSource::new(filename, source.to_string()),
        span: span.unwrap_or((0, 0)).into(),
        message: error.to_string(),
        label,
        suggestion,
    }
}

/// Render a compile error for a file as a miette report.
pub fn render_compile_error(error: &CompileError, source: &str, filename: &str) -> miette::Report {
    miette::Report::new(compile_error_to_diagnostic(error, source, filename))
}

fn dependency_suggestion(fault: DependencyFault, depends_on: &str) -> Option<String> {
    match fault {
        DependencyFault::UnknownField => {
            Some(format!("Add a field named '{depends_on}' or fix the reference."))
        }
        DependencyFault::NotEarlier => Some(format!(
            "Give '{depends_on}' a smaller \"order\" than the field that depends on it."
        )),
        DependencyFault::MissingTriggerValue => {
            Some("Add \"dependsOnValue\" next to \"dependsOn\".".to_string())
        }
        DependencyFault::Cycle => Some("Break the cycle by removing one dependsOn.".to_string()),
        _ => None,
    }
}

/// Span of the `"name": "<field>"` pair defining a field, searching from `from`.
fn find_field(source: &str, field: &str, from: usize) -> Option<(usize, usize)> {
    find_pair(source, "name", field, from)
}

/// Span of a `"key": "value"` pair at or after byte `from`.
fn find_pair(source: &str, key: &str, value: &str, from: usize) -> Option<(usize, usize)> {
    let pattern = format!(
        r#""{}"\s*:\s*"{}""#,
        regex::escape(key),
        regex::escape(value)
    );
    search(source, &pattern, from)
}

/// Span of a `"key":` at or after byte `from`.
fn find_key(source: &str, key: &str, from: usize) -> Option<(usize, usize)> {
    search(source, &format!(r#""{}"\s*:"#, regex::escape(key)), from)
}

fn search(source: &str, pattern: &str, from: usize) -> Option<(usize, usize)> {
    let re = Regex::new(pattern).ok()?;
    let found = re.find_at(source, from.min(source.len()))?;
    Some((found.start(), found.len()))
}
