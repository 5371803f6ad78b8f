//! InMemoryConfigStore - テスト・組み込み用の設定ストア

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{ModuleConfig, ModuleId};
use crate::ports::{ConfigStore, StoreError};

#[derive(Default)]
pub struct InMemoryConfigStore {
    modules: RwLock<HashMap<ModuleId, ModuleConfig>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_module(self, config: ModuleConfig) -> Self {
        self.insert(config);
        self
    }

    /// Insert or replace a record, keyed by its id.
    pub fn insert(&self, config: ModuleConfig) {
        let mut modules = self.modules.write().unwrap_or_else(|e| e.into_inner());
        modules.insert(config.id.clone(), config);
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load(&self, module_id: &ModuleId) -> Result<Option<ModuleConfig>, StoreError> {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        Ok(modules.get(module_id).cloned())
    }
}
