mod field_definition;
mod field_name;
mod field_type;
mod field_validation;
mod form_definition;
mod ids;
mod submission;
mod submitted_value;

pub use field_definition::FieldDefinition;
pub use field_name::FieldName;
pub use field_type::FieldType;
pub use field_validation::FieldValidation;
pub use form_definition::FormDefinition;
pub use ids::{FormId, SubmissionId};
pub use submission::SubmissionRecord;
pub use submitted_value::{SubmissionData, SubmittedValue};
