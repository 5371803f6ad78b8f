//! ConfigStore port - module 設定レコードの読み出し
//!
//! 正本は外部（CMS のテーブル等）にあり、この crate は読むだけ。
//!
//! # 実装
//! - InMemoryConfigStore（テスト・組み込み用）
//! - JsonFileConfigStore（CLI 用、JSON ファイルを毎回読む）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ModuleConfig, ModuleId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is corrupt: {0}")]
    Corrupt(String),
}

/// Read-only access to module configuration records.
///
/// `Ok(None)` means the record does not exist; `Err` means the store itself
/// could not answer.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self, module_id: &ModuleId) -> Result<Option<ModuleConfig>, StoreError>;
}
