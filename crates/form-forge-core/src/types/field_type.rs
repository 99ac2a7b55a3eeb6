use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of input kinds a form field can have.
///
/// Only `Number`, `Email` and `Text` carry semantic checks beyond presence;
/// see [`crate::compiler::TypeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Email,
    Date,
    Checkbox,
    Radio,
    Select,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 9] = [
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Email,
        Self::Date,
        Self::Checkbox,
        Self::Radio,
        Self::Select,
        Self::File,
    ];

    /// Radio and select fields cannot be answered without options.
    pub fn requires_options(self) -> bool {
        matches!(self, Self::Radio | Self::Select)
    }

    /// Whether `options` has any meaning for this type.
    pub fn uses_options(self) -> bool {
        matches!(self, Self::Radio | Self::Select | Self::Checkbox)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Email => "email",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::File => "file",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
