use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Submitted data: field name to raw value, exactly as received.
pub type SubmissionData = BTreeMap<String, SubmittedValue>;

/// A raw value from a submitter.
///
/// Numbers keep their original JSON representation so an accepted record
/// is stored exactly as submitted. `null` is treated the same as an
/// omitted key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl SubmittedValue {
    /// Absent-equivalent values: `null`, `""` and `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// String coercion used by activation predicates and pattern checks.
    ///
    /// Integral numbers print without a fractional part, so `5.0` and `5`
    /// both coerce to `"5"`.
    pub fn coerce_to_string(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => Cow::Owned(number_to_string(n)),
        }
    }

    /// Interprets the value as a finite number, if it is one.
    ///
    /// Strings are trimmed before parsing; booleans are never numbers.
    pub fn as_finite_number(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Null | Self::Bool(_) => None,
        }?;
        parsed.is_finite().then_some(parsed)
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{f}"),
        None => n.to_string(),
    }
}

impl From<&str> for SubmittedValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SubmittedValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for SubmittedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SubmittedValue {
    fn from(i: i64) -> Self {
        Self::Number(i.into())
    }
}

impl From<f64> for SubmittedValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(f: f64) -> Self {
        serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number)
    }
}

impl std::fmt::Display for SubmittedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Text(s) => write!(f, "\"{s}\""),
            other => write!(f, "{}", other.coerce_to_string()),
        }
    }
}
