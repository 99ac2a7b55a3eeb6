use serde::{Deserialize, Serialize};

/// Optional per-field constraints.
///
/// `min`/`max` only apply to number fields and `regex` only to text fields;
/// the compiler ignores them elsewhere.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl FieldValidation {
    /// No constraints.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Inclusive numeric bounds.
    pub fn with_range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            regex: None,
        }
    }

    pub fn with_min(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn with_max(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    /// A pattern the text value must match somewhere (unanchored).
    pub fn with_regex(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.regex.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_is_empty() {
        assert!(FieldValidation::unconstrained().is_empty());
        assert!(!FieldValidation::with_min(1.0).is_empty());
    }

    #[test]
    fn serde_skips_none() {
        let json = serde_json::to_string(&FieldValidation::unconstrained()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn deserializes_partial_object() {
        let v: FieldValidation = serde_json::from_str(r#"{"max": 99}"#).unwrap();
        assert_eq!(v.max, Some(99.0));
        assert_eq!(v.min, None);
        assert_eq!(v.regex, None);
    }
}
