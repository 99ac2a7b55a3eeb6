use std::future::Future;

use form_forge_core::types::{FormDefinition, FormId, SubmissionId, SubmissionRecord};

use crate::error::BackendError;
use crate::page::{PageRequest, SubmissionPage};

/// Storage-agnostic trait for form definitions.
///
/// Stores persist what they are given. Compiling a definition before it is
/// stored is the authoring service's job.
///
/// Uses RPITIT (return position impl Trait in trait) for async methods,
/// avoiding the `async-trait` crate.
pub trait FormStore: Send + Sync {
    /// Store a new form.
    ///
    /// Returns `BackendError::FormAlreadyExists` if the id is taken.
    fn create_form(
        &self,
        form: &FormDefinition,
    ) -> impl Future<Output = Result<FormDefinition, BackendError>> + Send;

    /// Load a form by id.
    ///
    /// Returns `BackendError::FormNotFound` if no such form is stored.
    fn get_form(
        &self,
        id: &FormId,
    ) -> impl Future<Output = Result<FormDefinition, BackendError>> + Send;

    /// Replace a stored form wholesale. The stored `id` and `created_at`
    /// are kept and `updated_at` is refreshed.
    fn replace_form(
        &self,
        id: &FormId,
        form: FormDefinition,
    ) -> impl Future<Output = Result<FormDefinition, BackendError>> + Send;

    /// Delete a form. Its submissions are left in place.
    fn delete_form(&self, id: &FormId) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// All stored forms, oldest first.
    fn list_forms(&self) -> impl Future<Output = Result<Vec<FormDefinition>, BackendError>> + Send;
}

/// Storage-agnostic trait for accepted submissions.
///
/// Records are immutable once stored; there is no update operation.
pub trait SubmissionStore: Send + Sync {
    fn create_submission(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = Result<SubmissionId, BackendError>> + Send;

    /// Returns `BackendError::SubmissionNotFound` if the record does not exist.
    fn get_submission(
        &self,
        id: &SubmissionId,
    ) -> impl Future<Output = Result<SubmissionRecord, BackendError>> + Send;

    fn delete_submission(
        &self,
        id: &SubmissionId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// One page of a form's submissions, newest first.
    ///
    /// The form does not need to exist: orphaned submissions are still listed.
    fn list_submissions(
        &self,
        form_id: &FormId,
        request: PageRequest,
    ) -> impl Future<Output = Result<SubmissionPage, BackendError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time verification that the traits carry Send + Sync bounds.
    fn _assert_form_store_send_sync<T: FormStore>() {}
    fn _assert_submission_store_send_sync<T: SubmissionStore>() {}
}
