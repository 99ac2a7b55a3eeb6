use serde::{Deserialize, Serialize};

use super::field_name::FieldName;
use super::field_type::FieldType;
use super::field_validation::FieldValidation;

/// One field of a form: type, constraints, position and visibility rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: FieldName,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<FieldName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on_value: Option<String>,
}

impl FieldDefinition {
    /// Creates an optional, unconstrained, always-visible field.
    pub fn new(
        name: FieldName,
        label: impl Into<String>,
        field_type: FieldType,
        order: i64,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            field_type,
            required: false,
            order,
            options: Vec::new(),
            validation: None,
            depends_on: None,
            depends_on_value: None,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Makes the field active only while `controller` currently holds `value`.
    pub fn depends_on(mut self, controller: FieldName, value: impl Into<String>) -> Self {
        self.depends_on = Some(controller);
        self.depends_on_value = Some(value.into());
        self
    }

    /// The numeric bounds, if this is a number field that declares any.
    pub fn numeric_bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        if self.field_type != FieldType::Number {
            return None;
        }
        let v = self.validation.as_ref()?;
        if v.min.is_none() && v.max.is_none() {
            return None;
        }
        Some((v.min, v.max))
    }

    /// The pattern source, if this is a text field that declares one.
    pub fn pattern(&self) -> Option<&str> {
        if self.field_type != FieldType::Text {
            return None;
        }
        self.validation.as_ref()?.regex.as_deref()
    }

    pub fn is_conditional(&self) -> bool {
        self.depends_on.is_some()
    }
}

impl std::fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} #{}", self.name, self.field_type, self.order)?;
        if self.required {
            write!(f, " @required")?;
        }
        if let Some(controller) = &self.depends_on {
            write!(
                f,
                " @when({controller} = \"{}\")",
                self.depends_on_value.as_deref().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    #[test]
    fn new_field_defaults() {
        let fd = FieldDefinition::new(name("email"), "Email", FieldType::Email, 0);
        assert!(!fd.required);
        assert!(fd.options.is_empty());
        assert!(fd.validation.is_none());
        assert!(!fd.is_conditional());
    }

    #[test]
    fn display() {
        let fd = FieldDefinition::new(name("state"), "State", FieldType::Text, 1)
            .required()
            .depends_on(name("country"), "USA");
        assert_eq!(
            fd.to_string(),
            "state: text #1 @required @when(country = \"USA\")"
        );
    }

    #[test]
    fn numeric_bounds_only_for_number() {
        let number = FieldDefinition::new(name("age"), "Age", FieldType::Number, 0)
            .with_validation(FieldValidation::with_min(18.0));
        assert_eq!(number.numeric_bounds(), Some((Some(18.0), None)));

        let text = FieldDefinition::new(name("nick"), "Nick", FieldType::Text, 0)
            .with_validation(FieldValidation::with_min(18.0));
        assert_eq!(text.numeric_bounds(), None);
    }

    #[test]
    fn pattern_only_for_text() {
        let text = FieldDefinition::new(name("zip"), "Zip", FieldType::Text, 0)
            .with_validation(FieldValidation::with_regex("^[0-9]{5}$"));
        assert_eq!(text.pattern(), Some("^[0-9]{5}$"));

        let area = FieldDefinition::new(name("bio"), "Bio", FieldType::Textarea, 0)
            .with_validation(FieldValidation::with_regex("x"));
        assert_eq!(area.pattern(), None);
    }

    #[test]
    fn deserializes_camel_case_shape() {
        let json = r#"{
            "name": "state",
            "label": "State",
            "type": "select",
            "order": 3,
            "options": ["CA", "NY"],
            "dependsOn": "country",
            "dependsOnValue": "USA"
        }"#;
        let fd: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(fd.field_type, FieldType::Select);
        assert!(!fd.required);
        assert_eq!(fd.options, vec!["CA", "NY"]);
        assert_eq!(fd.depends_on.as_ref().map(FieldName::as_str), Some("country"));
        assert_eq!(fd.depends_on_value.as_deref(), Some("USA"));
    }

    #[test]
    fn serde_skips_empty_optionals() {
        let fd = FieldDefinition::new(name("x"), "X", FieldType::Date, 0);
        let json = serde_json::to_string(&fd).unwrap();
        assert!(!json.contains("options"));
        assert!(!json.contains("validation"));
        assert!(!json.contains("dependsOn"));
        assert!(json.contains("\"type\":\"date\""));
    }
}
