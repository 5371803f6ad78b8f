//! Errors - 実行エラーの分類
//!
//! 1 回の run で起こりうる失敗をすべて列挙し、それぞれを `TaskStatus` に写像する。
//! run の外へ伝播することはない（executor が必ず ExecutionResult に変換する）。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ModuleId, TaskStatus};

/// ErrorKind は運用上の分類
///
/// - Permanent: 設定を直さない限り結果は変わらない
/// - Transient: 時間をおけば成功しうる（ネットワーク、リモート側の一時障害）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Transient,
    Permanent,
}

/// Every way a run can fall short of `OK`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("module {0} not found")]
    NotFound(ModuleId),

    #[error("module {module_id} is not Pretty Reviews (kind={actual})")]
    KindMismatch { module_id: ModuleId, actual: String },

    #[error("Missing required parameters in Pretty Reviews module: {}", .missing.join(", "))]
    ConfigIncomplete { missing: Vec<&'static str> },

    #[error("Missing required parameters in Pretty Reviews module: params unreadable ({0})")]
    ParamsUnreadable(String),

    #[error("configuration store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    TransportFailure(String),

    #[error("malformed response: {0}")]
    ResponseMalformed(String),

    #[error("Something went wrong with the AJAX request! {0}")]
    SemanticFailure(String),
}

impl RunError {
    /// Status the scheduler sees for this failure.
    pub fn status(&self) -> TaskStatus {
        match self {
            RunError::NotFound(_) | RunError::KindMismatch { .. } => TaskStatus::NoRun,
            RunError::ConfigIncomplete { .. }
            | RunError::ParamsUnreadable(_)
            | RunError::StoreUnavailable(_)
            | RunError::TransportFailure(_)
            | RunError::ResponseMalformed(_)
            | RunError::SemanticFailure(_) => TaskStatus::Knockout,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::StoreUnavailable(_)
            | RunError::TransportFailure(_)
            | RunError::ResponseMalformed(_)
            | RunError::SemanticFailure(_) => ErrorKind::Transient,
            RunError::NotFound(_)
            | RunError::KindMismatch { .. }
            | RunError::ConfigIncomplete { .. }
            | RunError::ParamsUnreadable(_) => ErrorKind::Permanent,
        }
    }
}
