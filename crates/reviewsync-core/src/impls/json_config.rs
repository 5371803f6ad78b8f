//! JsonFileConfigStore - JSON ファイルから module 設定を読む
//!
//! ファイル形式（CMS の modules テーブルをエクスポートしたもの）:
//!
//! ```json
//! [
//!   { "id": "117", "module": "mod_prettyreviews", "params": "{\"cid\":\"...\"}" }
//! ]
//! ```
//!
//! load のたびにファイルを読み直す（キャッシュしない）。

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::{ModuleConfig, ModuleId};
use crate::ports::{ConfigStore, StoreError};

pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigStore for JsonFileConfigStore {
    async fn load(&self, module_id: &ModuleId) -> Result<Option<ModuleConfig>, StoreError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<ModuleConfig> = serde_json::from_str(&text)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))?;

        Ok(records.into_iter().find(|r| &r.id == module_id))
    }
}
