//! Derives a validation contract from a form definition.
//!
//! [`compile`] is pure and deterministic: the same definition content always
//! yields an equal contract, and every definition defect is reported here
//! rather than during validation.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{CompileError, DependencyFault};
use crate::types::{
    FieldDefinition, FieldName, FieldType, FormDefinition, FormId, SubmissionData, SubmittedValue,
};

/// Compiled rules for a whole form, fields in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledContract {
    pub form_id: FormId,
    pub title: String,
    pub fields: Vec<CompiledField>,
}

impl CompiledContract {
    /// Looks up a compiled field by name.
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }

    /// Field names in evaluation order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// The resolved rule set for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledField {
    pub name: FieldName,
    pub label: String,
    pub field_type: FieldType,
    pub order: i64,
    pub required: bool,
    pub type_check: TypeCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_check: Option<RangeCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_check: Option<PatternCheck>,
    pub activation: Activation,
}

/// Type-specific shape check applied to a present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCheck {
    /// Presence/required only.
    Presence,
    /// `local@domain.tld` shape.
    Email,
    /// Finite number.
    Number,
}

impl TypeCheck {
    fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Email => Self::Email,
            FieldType::Number => Self::Number,
            _ => Self::Presence,
        }
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeCheck {
    /// Returns the error message when `value` falls outside the bounds.
    pub fn violation(&self, value: f64) -> Option<String> {
        if let Some(min) = self.min {
            if value < min {
                return Some(format!("Must be at least {min}"));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(format!("Must be at most {max}"));
            }
        }
        None
    }
}

/// A compiled text pattern. Compared and serialized by its source text.
#[derive(Debug, Clone)]
pub struct PatternCheck {
    regex: Regex,
}

impl PatternCheck {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Unanchored search, like a `test()` call on the pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for PatternCheck {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for PatternCheck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// When a field takes part in validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum Activation {
    Always,
    /// Active while the controlling field's value, coerced to a string,
    /// equals `value`.
    Equals { field: FieldName, value: String },
}

impl Activation {
    /// Evaluates the predicate against submitted data. An absent or null
    /// controlling value never activates a dependent field.
    pub fn is_active(&self, data: &SubmissionData) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { field, value } => match data.get(field.as_str()) {
                None | Some(SubmittedValue::Null) => false,
                Some(current) => current.coerce_to_string() == value.as_str(),
            },
        }
    }
}

/// Compiles a form definition into a validation contract.
pub fn compile(form: &FormDefinition) -> Result<CompiledContract, CompileError> {
    if form.title.trim().is_empty() {
        return Err(CompileError::EmptyTitle);
    }
    if form.description.trim().is_empty() {
        return Err(CompileError::EmptyDescription);
    }
    if form.fields.is_empty() {
        return Err(CompileError::EmptyFields);
    }

    // Stable: ties keep their original sequence position.
    let mut ordered: Vec<&FieldDefinition> = form.fields.iter().collect();
    ordered.sort_by_key(|f| f.order);

    let mut seen = HashSet::with_capacity(ordered.len());
    for field in &ordered {
        if !seen.insert(field.name.as_str()) {
            return Err(CompileError::DuplicateFieldName(field.name.to_string()));
        }
    }

    for field in &ordered {
        if field.field_type.requires_options() && field.options.is_empty() {
            return Err(CompileError::MissingOptions(field.name.to_string()));
        }
    }

    let mut ranges = Vec::with_capacity(ordered.len());
    for field in &ordered {
        ranges.push(compile_range(field)?);
    }

    let mut patterns = Vec::with_capacity(ordered.len());
    for field in &ordered {
        patterns.push(compile_pattern(field)?);
    }

    check_dependencies(&ordered)?;

    let fields = ordered
        .iter()
        .zip(ranges)
        .zip(patterns)
        .map(|((field, range_check), pattern_check)| CompiledField {
            name: field.name.clone(),
            label: field.label.clone(),
            field_type: field.field_type,
            order: field.order,
            required: field.required,
            type_check: TypeCheck::for_type(field.field_type),
            range_check,
            pattern_check,
            activation: activation_for(field),
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        form = %form.id,
        fields = fields.len(),
        conditional = fields.iter().filter(|f| f.activation != Activation::Always).count(),
        "compiled form contract"
    );

    Ok(CompiledContract {
        form_id: form.id.clone(),
        title: form.title.clone(),
        fields,
    })
}

fn compile_range(field: &FieldDefinition) -> Result<Option<RangeCheck>, CompileError> {
    let Some((min, max)) = field.numeric_bounds() else {
        return Ok(None);
    };
    let invalid = || CompileError::InvalidRange {
        field: field.name.to_string(),
        min: min.unwrap_or(f64::NEG_INFINITY),
        max: max.unwrap_or(f64::INFINITY),
    };
    if min.is_some_and(|m| !m.is_finite()) || max.is_some_and(|m| !m.is_finite()) {
        return Err(invalid());
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(invalid());
        }
    }
    Ok(Some(RangeCheck { min, max }))
}

fn compile_pattern(field: &FieldDefinition) -> Result<Option<PatternCheck>, CompileError> {
    let Some(source) = field.pattern() else {
        return Ok(None);
    };
    Regex::new(source)
        .map(|regex| Some(PatternCheck { regex }))
        .map_err(|e| CompileError::InvalidPattern {
            field: field.name.to_string(),
            pattern: source.to_string(),
            reason: e.to_string(),
        })
}

fn activation_for(field: &FieldDefinition) -> Activation {
    match (&field.depends_on, &field.depends_on_value) {
        (Some(controller), Some(value)) => Activation::Equals {
            field: controller.clone(),
            value: value.clone(),
        },
        _ => Activation::Always,
    }
}

/// Dependencies must reference an existing, strictly earlier field and the
/// edge set must be acyclic. `fields` is in evaluation order.
fn check_dependencies(fields: &[&FieldDefinition]) -> Result<(), CompileError> {
    let orders: HashMap<&str, i64> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.order))
        .collect();

    let mut edges: HashMap<&str, &str> = HashMap::new();
    for field in fields {
        let Some(controller) = &field.depends_on else {
            continue;
        };
        if !orders.contains_key(controller.as_str()) {
            return Err(dependency_error(field, controller, DependencyFault::UnknownField));
        }
        if field.depends_on_value.is_none() {
            return Err(dependency_error(field, controller, DependencyFault::MissingTriggerValue));
        }
        edges.insert(field.name.as_str(), controller.as_str());
    }

    if let Some(start) = find_cycle(fields, &edges) {
        if let Some(field) = fields.iter().find(|f| f.name.as_str() == start) {
            if let Some(controller) = &field.depends_on {
                return Err(dependency_error(field, controller, DependencyFault::Cycle));
            }
        }
    }

    for field in fields {
        let Some(controller) = &field.depends_on else {
            continue;
        };
        if orders[controller.as_str()] >= field.order {
            return Err(dependency_error(field, controller, DependencyFault::NotEarlier));
        }
    }

    Ok(())
}

fn dependency_error(
    field: &FieldDefinition,
    depends_on: &FieldName,
    fault: DependencyFault,
) -> CompileError {
    CompileError::InvalidDependency {
        field: field.name.to_string(),
        depends_on: depends_on.to_string(),
        fault,
    }
}

/// Walks the dependency edges (each field has at most one) and returns the
/// first field, in evaluation order, that lies on a cycle.
fn find_cycle<'a>(
    fields: &[&'a FieldDefinition],
    edges: &HashMap<&'a str, &'a str>,
) -> Option<&'a str> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(fields.len());
    for field in fields {
        let start = field.name.as_str();
        if marks.contains_key(start) {
            continue;
        }
        let mut path = Vec::new();
        let mut current = Some(start);
        while let Some(node) = current {
            match marks.get(node) {
                Some(Mark::Done) => break,
                Some(Mark::Visiting) => return Some(node),
                None => {
                    marks.insert(node, Mark::Visiting);
                    path.push(node);
                    current = edges.get(node).copied();
                }
            }
        }
        for node in path {
            marks.insert(node, Mark::Done);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValidation;

    fn name(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    fn field(n: &str, field_type: FieldType, order: i64) -> FieldDefinition {
        FieldDefinition::new(name(n), n, field_type, order)
    }

    fn form(fields: Vec<FieldDefinition>) -> FormDefinition {
        FormDefinition::new("Survey", "A short survey", fields)
    }

    fn dependency_fault(result: Result<CompiledContract, CompileError>) -> DependencyFault {
        match result {
            Err(CompileError::InvalidDependency { fault, .. }) => fault,
            other => panic!("expected InvalidDependency, got {other:?}"),
        }
    }

    #[test]
    fn orders_fields_stably() {
        let contract = compile(&form(vec![
            field("c", FieldType::Text, 2),
            field("a", FieldType::Text, 0),
            field("b2", FieldType::Text, 1),
            field("b1", FieldType::Text, 1),
        ]))
        .unwrap();
        let names: Vec<_> = contract.field_names().collect();
        assert_eq!(names, vec!["a", "b2", "b1", "c"]);
    }

    #[test]
    fn header_checks() {
        let mut f = form(vec![field("a", FieldType::Text, 0)]);
        f.title = "  ".into();
        assert_eq!(compile(&f), Err(CompileError::EmptyTitle));

        let mut f = form(vec![field("a", FieldType::Text, 0)]);
        f.description = String::new();
        assert_eq!(compile(&f), Err(CompileError::EmptyDescription));

        assert_eq!(compile(&form(vec![])), Err(CompileError::EmptyFields));
    }

    #[test]
    fn duplicate_names() {
        let result = compile(&form(vec![
            field("email", FieldType::Email, 0),
            field("email", FieldType::Text, 1),
        ]));
        assert_eq!(result, Err(CompileError::DuplicateFieldName("email".into())));
    }

    #[test]
    fn missing_options_for_radio_and_select() {
        for ft in [FieldType::Radio, FieldType::Select] {
            let result = compile(&form(vec![field("pick", ft, 0)]));
            assert_eq!(result, Err(CompileError::MissingOptions("pick".into())));
        }
        assert!(compile(&form(vec![field("agree", FieldType::Checkbox, 0)])).is_ok());
        assert!(compile(&form(vec![
            field("pick", FieldType::Select, 0).with_options(["a", "b"])
        ]))
        .is_ok());
    }

    #[test]
    fn inverted_range() {
        let result = compile(&form(vec![field("age", FieldType::Number, 0)
            .with_validation(FieldValidation::with_range(10.0, 1.0))]));
        assert!(matches!(result, Err(CompileError::InvalidRange { .. })));
    }

    #[test]
    fn range_ignored_outside_number() {
        let contract = compile(&form(vec![field("nick", FieldType::Text, 0)
            .with_validation(FieldValidation::with_range(10.0, 1.0))]))
        .unwrap();
        assert_eq!(contract.fields[0].range_check, None);
    }

    #[test]
    fn invalid_regex_is_a_compile_fault() {
        let result = compile(&form(vec![field("zip", FieldType::Text, 0)
            .with_validation(FieldValidation::with_regex("([0-9]"))]));
        assert!(matches!(
            result,
            Err(CompileError::InvalidPattern { ref field, .. }) if field == "zip"
        ));
    }

    #[test]
    fn regex_ignored_outside_text() {
        let contract = compile(&form(vec![field("bio", FieldType::Textarea, 0)
            .with_validation(FieldValidation::with_regex("(("))]))
        .unwrap();
        assert_eq!(contract.fields[0].pattern_check, None);
    }

    #[test]
    fn unknown_dependency() {
        let result = compile(&form(vec![
            field("state", FieldType::Text, 1).depends_on(name("country"), "USA")
        ]));
        assert_eq!(dependency_fault(result), DependencyFault::UnknownField);
    }

    #[test]
    fn forward_dependency() {
        let result = compile(&form(vec![
            field("state", FieldType::Text, 0).depends_on(name("country"), "USA"),
            field("country", FieldType::Text, 1),
        ]));
        assert_eq!(dependency_fault(result), DependencyFault::NotEarlier);
    }

    #[test]
    fn equal_order_dependency() {
        let result = compile(&form(vec![
            field("country", FieldType::Text, 1),
            field("state", FieldType::Text, 1).depends_on(name("country"), "USA"),
        ]));
        assert_eq!(dependency_fault(result), DependencyFault::NotEarlier);
    }

    #[test]
    fn cyclic_dependency() {
        let result = compile(&form(vec![
            field("a", FieldType::Text, 0).depends_on(name("b"), "x"),
            field("b", FieldType::Text, 1).depends_on(name("a"), "y"),
        ]));
        assert_eq!(dependency_fault(result), DependencyFault::Cycle);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let result = compile(&form(vec![
            field("a", FieldType::Text, 0).depends_on(name("a"), "x")
        ]));
        assert_eq!(dependency_fault(result), DependencyFault::Cycle);
    }

    #[test]
    fn missing_trigger_value() {
        let mut dependent = field("state", FieldType::Text, 1);
        dependent.depends_on = Some(name("country"));
        let result = compile(&form(vec![field("country", FieldType::Text, 0), dependent]));
        assert_eq!(dependency_fault(result), DependencyFault::MissingTriggerValue);
    }

    #[test]
    fn backward_chain_compiles() {
        let contract = compile(&form(vec![
            field("a", FieldType::Text, 0),
            field("b", FieldType::Text, 1).depends_on(name("a"), "yes"),
            field("c", FieldType::Text, 2).depends_on(name("b"), "yes"),
        ]))
        .unwrap();
        assert_eq!(contract.fields[0].activation, Activation::Always);
        assert_eq!(
            contract.fields[2].activation,
            Activation::Equals {
                field: name("b"),
                value: "yes".into()
            }
        );
    }

    #[test]
    fn type_checks_resolved() {
        let contract = compile(&form(vec![
            field("email", FieldType::Email, 0),
            field("age", FieldType::Number, 1).with_validation(FieldValidation::with_min(18.0)),
            field("when", FieldType::Date, 2),
        ]))
        .unwrap();
        assert_eq!(contract.fields[0].type_check, TypeCheck::Email);
        assert_eq!(contract.fields[1].type_check, TypeCheck::Number);
        assert_eq!(
            contract.fields[1].range_check,
            Some(RangeCheck {
                min: Some(18.0),
                max: None
            })
        );
        assert_eq!(contract.fields[2].type_check, TypeCheck::Presence);
    }

    #[test]
    fn deterministic_shape() {
        let definition = form(vec![
            field("country", FieldType::Text, 0)
                .required()
                .with_validation(FieldValidation::with_regex("^[A-Z]")),
            field("state", FieldType::Text, 1).depends_on(name("country"), "USA"),
        ]);
        let first = compile(&definition).unwrap();
        let second = compile(&definition.clone()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn activation_coerces_to_string() {
        let activation = Activation::Equals {
            field: name("count"),
            value: "3".into(),
        };
        let mut data = SubmissionData::new();
        assert!(!activation.is_active(&data));
        data.insert("count".into(), SubmittedValue::from(3_i64));
        assert!(activation.is_active(&data));
        data.insert("count".into(), SubmittedValue::from("3"));
        assert!(activation.is_active(&data));
        data.insert("count".into(), SubmittedValue::Null);
        assert!(!activation.is_active(&data));
    }

    #[test]
    fn range_violation_messages() {
        let range = RangeCheck {
            min: Some(10.0),
            max: Some(20.5),
        };
        assert_eq!(range.violation(5.0).as_deref(), Some("Must be at least 10"));
        assert_eq!(range.violation(21.0).as_deref(), Some("Must be at most 20.5"));
        assert_eq!(range.violation(10.0), None);
        assert_eq!(range.violation(20.5), None);
    }
}
