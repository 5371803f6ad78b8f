//! Outcome - 1 回の run がスケジューラに返すもの
//!
//! - スケジューラは `TaskStatus` と `ErrorKind` だけを見て skip / retry / alert を決める
//! - log entries は運用者が後から読む監査ログ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ErrorKind, ModuleId, RunId};

/// Caller-visible status of a run.
///
/// Serialized as SCREAMING_SNAKE_CASE (`OK` / `NO_RUN` / `KNOCKOUT`) to match
/// the scheduler's status names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Config found, remote update confirmed.
    Ok,

    /// Nothing applicable to do: no record, or a record for another feature.
    NoRun,

    /// The run did not reach its goal. The scheduler may retry or alert.
    Knockout,
}

impl TaskStatus {
    /// スケジューラの status 表での数値コード
    pub fn code(self) -> i32 {
        match self {
            TaskStatus::Ok => 0,
            TaskStatus::NoRun => 3,
            TaskStatus::Knockout => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// ExecutionResult は 1 run の結果（status と順序付きログ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub run_id: RunId,
    pub module_id: ModuleId,
    pub status: TaskStatus,
    pub log_entries: Vec<LogEntry>,

    /// 実際に送ったリクエスト数（0 か 1）
    pub requests_issued: u32,

    /// 失敗時のみ。スケジューラはこれを見て retry か alert かを決める
    pub error_kind: Option<ErrorKind>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExecutionResult {
    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.log_entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
    }
}
