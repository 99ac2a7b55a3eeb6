use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::reorder;

use super::field_definition::FieldDefinition;
use super::ids::FormId;

/// A form as authored: title, description and its fields.
///
/// Construction performs no checks; [`crate::compile`] is the gate that
/// decides whether a definition is usable. Edits always swap the whole
/// field vector, so a partially renumbered sequence is never observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    #[serde(default)]
    pub id: FormId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl FormDefinition {
    /// Creates a definition with a fresh id and timestamps.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: FormId::new(),
            title: title.into(),
            description: description.into(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }

    /// Display position of a field, counting by `order` with ties kept in
    /// stored sequence.
    pub fn position(&self, name: &str) -> Option<usize> {
        let mut display: Vec<&FieldDefinition> = self.fields.iter().collect();
        display.sort_by_key(|f| f.order);
        display.iter().position(|f| f.name.as_str() == name)
    }

    /// Full replacement: content comes from `next`, identity and creation
    /// time are kept, `updated_at` is refreshed.
    pub fn replaced_by(&self, next: FormDefinition) -> FormDefinition {
        FormDefinition {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
            ..next
        }
    }

    /// Whether two definitions describe the same form content, ignoring
    /// identity and timestamps.
    pub fn same_content(&self, other: &FormDefinition) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.fields == other.fields
    }

    /// Appends a field at the end, assigning it the next position.
    pub fn push_field(&mut self, mut field: FieldDefinition) {
        let mut fields = reorder::renumber(&self.fields);
        field.order = fields.len() as i64;
        fields.push(field);
        self.fields = fields;
    }

    /// Replaces the field at display position `index`, keeping its slot.
    pub fn replace_field(&mut self, index: usize, mut field: FieldDefinition) -> Result<(), OrderError> {
        let len = self.fields.len();
        if index >= len {
            return Err(OrderError::IndexOutOfRange { index, len });
        }
        let mut fields = reorder::renumber(&self.fields);
        field.order = fields[index].order;
        fields[index] = field;
        self.fields = fields;
        Ok(())
    }

    /// Removes the field at display position `index` and closes the gap.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDefinition, OrderError> {
        let len = self.fields.len();
        if index >= len {
            return Err(OrderError::IndexOutOfRange { index, len });
        }
        let mut fields = reorder::renumber(&self.fields);
        let removed = fields.remove(index);
        self.fields = reorder::renumber(&fields);
        Ok(removed)
    }

    /// Drag-and-drop move between display positions.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), OrderError> {
        self.fields = reorder::move_field(&self.fields, from, to)?;
        Ok(())
    }
}

impl std::fmt::Display for FormDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "form \"{}\" {{", self.title)?;
        for field in &self.fields {
            writeln!(f, "  {field}")?;
        }
        write!(f, "}}")
    }
}
