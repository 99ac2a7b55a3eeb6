use std::sync::Arc;

use form_forge_core::types::{FormDefinition, FormId};
use form_forge_core::{compile, CompiledContract};

use crate::cache::ContractCache;
use crate::caller::Caller;
use crate::error::BackendError;
use crate::traits::FormStore;

/// Admin-side form lifecycle.
///
/// Every definition is compiled before it reaches the store, so a stored
/// form always compiles. Reads are open to any caller.
#[derive(Debug)]
pub struct FormAuthoring<S> {
    store: S,
    cache: Arc<ContractCache>,
}

impl<S: FormStore> FormAuthoring<S> {
    pub fn new(store: S, cache: Arc<ContractCache>) -> Self {
        Self { store, cache }
    }

    /// Compiles and stores a new form.
    pub async fn create(
        &self,
        caller: &Caller,
        form: FormDefinition,
    ) -> Result<FormDefinition, BackendError> {
        caller.require_admin("create forms")?;
        compile(&form)?;
        let stored = self.store.create_form(&form).await?;
        tracing::info!(form = %stored.id, by = %caller, "form created");
        Ok(stored)
    }

    /// Compiles `form` and replaces the stored form `id` with it.
    ///
    /// The cached contract is dropped so the next submission compiles the
    /// new content.
    pub async fn replace(
        &self,
        caller: &Caller,
        id: &FormId,
        form: FormDefinition,
    ) -> Result<FormDefinition, BackendError> {
        caller.require_admin("replace forms")?;
        compile(&form)?;
        let stored = self.store.replace_form(id, form).await?;
        self.cache.invalidate(id).await;
        tracing::info!(form = %id, by = %caller, "form replaced");
        Ok(stored)
    }

    /// Deletes a form. Submissions made against it are kept.
    pub async fn delete(&self, caller: &Caller, id: &FormId) -> Result<(), BackendError> {
        caller.require_admin("delete forms")?;
        self.store.delete_form(id).await?;
        self.cache.invalidate(id).await;
        tracing::info!(form = %id, by = %caller, "form deleted");
        Ok(())
    }

    /// Compiles without storing, for editors that want to show the result
    /// of an edit before saving it.
    pub fn preview(
        &self,
        caller: &Caller,
        form: &FormDefinition,
    ) -> Result<CompiledContract, BackendError> {
        caller.require_admin("preview forms")?;
        Ok(compile(form)?)
    }

    pub async fn get(&self, id: &FormId) -> Result<FormDefinition, BackendError> {
        self.store.get_form(id).await
    }

    pub async fn list(&self) -> Result<Vec<FormDefinition>, BackendError> {
        self.store.list_forms().await
    }
}
