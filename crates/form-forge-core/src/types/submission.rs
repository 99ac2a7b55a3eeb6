use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{FormId, SubmissionId};
use super::submitted_value::{SubmissionData, SubmittedValue};

/// An accepted submission. Never updated after creation.
///
/// `form_id` is a plain back-reference: deleting the form leaves the
/// record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub data: SubmissionData,
    /// Where the submission came from, typically the client address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Creates a record with a fresh id, stamped now.
    pub fn new(form_id: FormId, data: SubmissionData, origin: Option<String>) -> Self {
        Self {
            id: SubmissionId::new(),
            form_id,
            data,
            origin,
            submitted_at: Utc::now(),
        }
    }

    /// Returns the submitted value of a field, if present.
    pub fn value(&self, name: &str) -> Option<&SubmittedValue> {
        self.data.get(name)
    }
}

impl std::fmt::Display for SubmissionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.form_id, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record() {
        let form_id = FormId::new();
        let mut data = SubmissionData::new();
        data.insert("country".into(), SubmittedValue::from("France"));
        let record = SubmissionRecord::new(form_id.clone(), data, Some("10.0.0.1".into()));

        assert!(record.id.as_str().starts_with("submission_"));
        assert_eq!(record.form_id, form_id);
        assert_eq!(record.value("country"), Some(&SubmittedValue::from("France")));
        assert_eq!(record.value("state"), None);
        assert!(record.to_string().starts_with("form_"));
    }

    #[test]
    fn serde_shape_is_camel_case() {
        let record = SubmissionRecord::new(FormId::new(), SubmissionData::new(), None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("formId").is_some());
        assert!(json.get("submittedAt").is_some());
        assert!(json.get("origin").is_none());
    }
}
