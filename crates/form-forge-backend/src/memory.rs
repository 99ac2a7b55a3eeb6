use std::sync::Arc;

use form_forge_core::types::{FormDefinition, FormId, SubmissionId, SubmissionRecord};
use tokio::sync::RwLock;

use crate::error::BackendError;
use crate::page::{PageRequest, SubmissionPage};
use crate::traits::{FormStore, SubmissionStore};

#[derive(Debug, Default)]
struct Tables {
    /// Insertion order, oldest first.
    forms: Vec<FormDefinition>,
    /// Insertion order, oldest first.
    submissions: Vec<SubmissionRecord>,
}

/// Reference store holding forms and submissions in memory.
///
/// Backed by `Arc<RwLock<..>>`; clones share the same tables, so one store
/// can be handed to both services.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn form_not_found(id: &FormId) -> BackendError {
    BackendError::FormNotFound {
        form_id: id.to_string(),
    }
}

fn submission_not_found(id: &SubmissionId) -> BackendError {
    BackendError::SubmissionNotFound {
        submission_id: id.to_string(),
    }
}

impl FormStore for InMemoryStore {
    async fn create_form(&self, form: &FormDefinition) -> Result<FormDefinition, BackendError> {
        let mut tables = self.inner.write().await;
        if tables.forms.iter().any(|f| f.id == form.id) {
            return Err(BackendError::FormAlreadyExists {
                form_id: form.id.to_string(),
            });
        }
        tables.forms.push(form.clone());
        tracing::info!(form = %form.id, fields = form.fields.len(), "stored form");
        Ok(form.clone())
    }

    async fn get_form(&self, id: &FormId) -> Result<FormDefinition, BackendError> {
        let tables = self.inner.read().await;
        tables
            .forms
            .iter()
            .find(|f| &f.id == id)
            .cloned()
            .ok_or_else(|| form_not_found(id))
    }

    async fn replace_form(
        &self,
        id: &FormId,
        form: FormDefinition,
    ) -> Result<FormDefinition, BackendError> {
        let mut tables = self.inner.write().await;
        let slot = tables
            .forms
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| form_not_found(id))?;
        *slot = slot.replaced_by(form);
        tracing::info!(form = %id, fields = slot.fields.len(), "replaced form");
        Ok(slot.clone())
    }

    async fn delete_form(&self, id: &FormId) -> Result<(), BackendError> {
        let mut tables = self.inner.write().await;
        let index = tables
            .forms
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| form_not_found(id))?;
        tables.forms.remove(index);
        tracing::info!(form = %id, "deleted form");
        Ok(())
    }

    async fn list_forms(&self) -> Result<Vec<FormDefinition>, BackendError> {
        Ok(self.inner.read().await.forms.clone())
    }
}

impl SubmissionStore for InMemoryStore {
    async fn create_submission(
        &self,
        record: &SubmissionRecord,
    ) -> Result<SubmissionId, BackendError> {
        let mut tables = self.inner.write().await;
        if tables.submissions.iter().any(|s| s.id == record.id) {
            return Err(BackendError::Internal {
                message: format!("duplicate submission id '{}'", record.id),
            });
        }
        tables.submissions.push(record.clone());
        tracing::info!(form = %record.form_id, submission = %record.id, "stored submission");
        Ok(record.id.clone())
    }

    async fn get_submission(&self, id: &SubmissionId) -> Result<SubmissionRecord, BackendError> {
        let tables = self.inner.read().await;
        tables
            .submissions
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| submission_not_found(id))
    }

    async fn delete_submission(&self, id: &SubmissionId) -> Result<(), BackendError> {
        let mut tables = self.inner.write().await;
        let index = tables
            .submissions
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| submission_not_found(id))?;
        tables.submissions.remove(index);
        tracing::info!(submission = %id, "deleted submission");
        Ok(())
    }

    async fn list_submissions(
        &self,
        form_id: &FormId,
        request: PageRequest,
    ) -> Result<SubmissionPage, BackendError> {
        let tables = self.inner.read().await;
        let mut matching: Vec<SubmissionRecord> = tables
            .submissions
            .iter()
            .rev()
            .filter(|s| &s.form_id == form_id)
            .cloned()
            .collect();
        // Stable: records stamped in the same instant stay newest-inserted first.
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(SubmissionPage::slice(matching, request))
    }
}
