use std::sync::Arc;

use form_forge_core::types::{FormId, SubmissionData, SubmissionId, SubmissionRecord};
use form_forge_core::validate;

use crate::cache::ContractCache;
use crate::caller::Caller;
use crate::error::{BackendError, IntakeError};
use crate::page::{PageRequest, SubmissionPage};
use crate::traits::{FormStore, SubmissionStore};

/// Accepts submissions from anyone and lets admins read them back.
#[derive(Debug)]
pub struct SubmissionIntake<S> {
    store: S,
    cache: Arc<ContractCache>,
}

impl<S: FormStore + SubmissionStore> SubmissionIntake<S> {
    pub fn new(store: S, cache: Arc<ContractCache>) -> Self {
        Self { store, cache }
    }

    /// Validates `data` against the current form and stores it.
    ///
    /// A form that has gone from the store also loses its cached contract.
    ///
    /// The form is read once; compile and validate both run against that
    /// snapshot, so a replacement landing mid-submission has no effect on it.
    pub async fn submit(
        &self,
        form_id: &FormId,
        data: SubmissionData,
        origin: Option<String>,
    ) -> Result<SubmissionId, IntakeError> {
        let form = match self.store.get_form(form_id).await {
            Ok(form) => form,
            Err(err @ BackendError::FormNotFound { .. }) => {
                self.cache.invalidate(form_id).await;
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };
        let contract = self
            .cache
            .contract_for(&form)
            .await
            .map_err(BackendError::from)?;

        let record = match validate(&contract, &data) {
            Ok(record) => record,
            Err(errors) => {
                tracing::warn!(form = %form_id, errors = errors.len(), "submission rejected");
                return Err(IntakeError::Rejected(errors));
            }
        };

        let record = SubmissionRecord::new(form.id, record.into_data(), origin);
        let id = self.store.create_submission(&record).await?;
        Ok(id)
    }

    pub async fn list(
        &self,
        caller: &Caller,
        form_id: &FormId,
        request: PageRequest,
    ) -> Result<SubmissionPage, BackendError> {
        caller.require_admin("list submissions")?;
        self.store.list_submissions(form_id, request).await
    }

    pub async fn get(
        &self,
        caller: &Caller,
        id: &SubmissionId,
    ) -> Result<SubmissionRecord, BackendError> {
        caller.require_admin("read submissions")?;
        self.store.get_submission(id).await
    }

    pub async fn delete(&self, caller: &Caller, id: &SubmissionId) -> Result<(), BackendError> {
        caller.require_admin("delete submissions")?;
        self.store.delete_submission(id).await?;
        tracing::info!(submission = %id, by = %caller, "submission deleted");
        Ok(())
    }
}
