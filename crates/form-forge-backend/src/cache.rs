use std::collections::HashMap;
use std::sync::Arc;

use form_forge_core::types::{FormDefinition, FormId};
use form_forge_core::{compile, CompileError, CompiledContract};
use tokio::sync::RwLock;

struct Entry {
    source: FormDefinition,
    contract: Arc<CompiledContract>,
}

/// Compiled contracts keyed by form id.
///
/// An entry is reused only while the definition it was compiled from has
/// the same content as the one asked about; anything else recompiles and
/// overwrites the entry.
#[derive(Default)]
pub struct ContractCache {
    entries: RwLock<HashMap<FormId, Entry>>,
}

impl ContractCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contract for `form`, compiling it if no up-to-date entry
    /// exists. Definitions that fail to compile are never cached.
    pub async fn contract_for(
        &self,
        form: &FormDefinition,
    ) -> Result<Arc<CompiledContract>, CompileError> {
        if let Some(entry) = self.entries.read().await.get(&form.id) {
            if entry.source.same_content(form) {
                return Ok(Arc::clone(&entry.contract));
            }
        }

        let contract = Arc::new(compile(form)?);
        tracing::debug!(form = %form.id, "cached compiled contract");
        self.entries.write().await.insert(
            form.id.clone(),
            Entry {
                source: form.clone(),
                contract: Arc::clone(&contract),
            },
        );
        Ok(contract)
    }

    /// Drops the entry for a form, if any.
    pub async fn invalidate(&self, id: &FormId) {
        self.entries.write().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl std::fmt::Debug for ContractCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_forge_core::types::{FieldDefinition, FieldName, FieldType};

    fn field(name: &str, order: i64) -> FieldDefinition {
        FieldDefinition::new(FieldName::new(name).unwrap(), name, FieldType::Text, order)
    }

    fn form() -> FormDefinition {
        FormDefinition::new("Cached", "Cache test", vec![field("a", 0)])
    }

    #[tokio::test]
    async fn same_content_reuses_contract() {
        let cache = ContractCache::new();
        let f = form();
        let first = cache.contract_for(&f).await.unwrap();
        let second = cache.contract_for(&f).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn changed_content_recompiles() {
        let cache = ContractCache::new();
        let mut f = form();
        let first = cache.contract_for(&f).await.unwrap();

        f.push_field(field("b", 1));
        let second = cache.contract_for(&f).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.fields.len(), 2);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn failed_compile_not_cached() {
        let cache = ContractCache::new();
        let broken = FormDefinition::new("", "No title", vec![field("a", 0)]);
        assert_eq!(
            cache.contract_for(&broken).await,
            Err(CompileError::EmptyTitle)
        );
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn invalidate_drops_entry() {
        let cache = ContractCache::new();
        let f = form();
        cache.contract_for(&f).await.unwrap();
        cache.invalidate(&f.id).await;
        assert!(cache.is_empty().await);
    }
}
