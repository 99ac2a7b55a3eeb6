//! Applies a compiled contract to submitted data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compiler::{CompiledContract, CompiledField, TypeCheck};
use crate::types::{SubmissionData, SubmittedValue};

/// Per-field rejection messages, keyed by field name.
///
/// Serializes as a plain `{ "field": "message" }` object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Submitted data that passed validation, unchanged from what was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedRecord(SubmissionData);

impl ValidatedRecord {
    pub fn data(&self) -> &SubmissionData {
        &self.0
    }

    pub fn into_data(self) -> SubmissionData {
        self.0
    }
}

/// Validates `data` against `contract` in a single left-to-right pass.
///
/// Every active field is checked and all failures are collected. Inactive
/// fields are skipped entirely; their values, like keys the form does not
/// know, are carried through untouched.
pub fn validate(
    contract: &CompiledContract,
    data: &SubmissionData,
) -> Result<ValidatedRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in &contract.fields {
        if !field.activation.is_active(data) {
            continue;
        }
        let present = data
            .get(field.name.as_str())
            .filter(|value| !value.is_empty());
        let message = match present {
            None if field.required => Some(format!("{} is required", field.label)),
            None => None,
            Some(value) => check_value(field, value),
        };
        if let Some(message) = message {
            errors.insert(field.name.as_str(), message);
        }
    }

    tracing::debug!(
        form = %contract.form_id,
        fields = contract.fields.len(),
        errors = errors.len(),
        "validated submission"
    );

    if errors.is_empty() {
        Ok(ValidatedRecord(data.clone()))
    } else {
        Err(errors)
    }
}

fn check_value(field: &CompiledField, value: &SubmittedValue) -> Option<String> {
    match field.type_check {
        TypeCheck::Email => {
            if !is_email_shape(&value.coerce_to_string()) {
                return Some("Invalid email address".to_string());
            }
        }
        TypeCheck::Number => match value.as_finite_number() {
            None => return Some("Must be a number".to_string()),
            Some(n) => {
                if let Some(message) = field.range_check.and_then(|r| r.violation(n)) {
                    return Some(message);
                }
            }
        },
        TypeCheck::Presence => {}
    }

    if let Some(pattern) = &field.pattern_check {
        if !pattern.is_match(&value.coerce_to_string()) {
            return Some("Invalid format".to_string());
        }
    }
    None
}

/// `local@domain.tld`: exactly one `@`, no whitespace, and a dot inside the
/// domain with characters on both sides.
fn is_email_shape(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
