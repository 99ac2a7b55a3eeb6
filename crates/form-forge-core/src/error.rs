use std::fmt;

/// Errors that occur when constructing form value types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Field name was empty or contained whitespace.
    InvalidFieldName(String),
    /// A TypeID string failed to parse or carried the wrong prefix.
    InvalidId { expected_prefix: String, reason: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFieldName(s) => {
                write!(
                    f,
                    "invalid field name '{s}': must be non-empty and contain no whitespace"
                )
            }
            Self::InvalidId {
                expected_prefix,
                reason,
            } => write!(f, "invalid {expected_prefix} id: {reason}"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Why a `dependsOn` reference was refused by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DependencyFault {
    /// The controlling field does not exist in the form.
    UnknownField,
    /// The controlling field is not ordered strictly before the dependent one.
    NotEarlier,
    /// `dependsOn` is set but `dependsOnValue` is missing.
    MissingTriggerValue,
    /// The dependency edges contain a cycle.
    Cycle,
}

impl fmt::Display for DependencyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => write!(f, "no such field"),
            Self::NotEarlier => write!(f, "controlling field must come earlier in the form"),
            Self::MissingTriggerValue => write!(f, "dependsOnValue is missing"),
            Self::Cycle => write!(f, "dependency cycle"),
        }
    }
}

/// A defect in a form definition, detected by [`crate::compile`].
///
/// Always surfaced to the form author; never repaired automatically.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CompileError {
    /// Title is empty or whitespace.
    EmptyTitle,
    /// Description is empty or whitespace.
    EmptyDescription,
    /// Form has no fields.
    EmptyFields,
    /// Two fields share a name.
    DuplicateFieldName(String),
    /// A radio or select field has no options.
    MissingOptions(String),
    /// Number bounds are inverted or not finite.
    InvalidRange { field: String, min: f64, max: f64 },
    /// The text pattern does not compile.
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
    /// A `dependsOn` reference is unusable.
    InvalidDependency {
        field: String,
        depends_on: String,
        fault: DependencyFault,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "form title must not be empty"),
            Self::EmptyDescription => write!(f, "form description must not be empty"),
            Self::EmptyFields => write!(f, "form must have at least one field"),
            Self::DuplicateFieldName(n) => write!(f, "duplicate field name '{n}'"),
            Self::MissingOptions(n) => {
                write!(f, "field '{n}' requires at least one option")
            }
            Self::InvalidRange { field, min, max } => {
                write!(f, "invalid range on field '{field}': min ({min}) > max ({max})")
            }
            Self::InvalidPattern {
                field,
                pattern,
                reason,
            } => write!(
                f,
                "invalid pattern on field '{field}': '{pattern}' does not compile: {reason}"
            ),
            Self::InvalidDependency {
                field,
                depends_on,
                fault,
            } => write!(
                f,
                "invalid dependency: field '{field}' depends on '{depends_on}': {fault}"
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors from editor-side field reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderError {
    /// A position is outside the field sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// The requested name sequence is not a permutation of the form's fields.
    NotAPermutation,
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "field index {index} out of range for {len} fields")
            }
            Self::NotAPermutation => {
                write!(f, "requested order must name every field exactly once")
            }
        }
    }
}

impl std::error::Error for OrderError {}
