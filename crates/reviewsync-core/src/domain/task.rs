//! Task - 1 回の呼び出しに必要なもの
//!
//! - `TaskType`: スケジューラが routine を選ぶための id
//! - `CancelSignal`: 呼び出し側が持つキャンセル通知（watch channel）
//! - `TaskInvocationContext`: module id, root URL, timeout, cancel をまとめたもの

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;

use super::ModuleId;

/// TaskType は routine の識別子（例: `prettyreviews.update_reviews`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskType(String);

impl TaskType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-owned cancellation signal.
/// - スケジューラが `watch::Sender` を持ち、`true` を送ると実行中のリクエストを諦める
/// - 送らずに sender を drop してもキャンセルにはならない
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self(rx)
    }

    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self(rx))
    }

    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// キャンセルが要求されたら完了する
    pub async fn cancelled(mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                // sender が消えた: もう誰もキャンセルできない
                std::future::pending::<()>().await;
            }
        }
    }
}

/// TaskInvocationContext は 1 回の run がスケジューラから受け取るもの
///
/// 呼び出しごとに作り直し、作った後は変更しない。
#[derive(Debug, Clone)]
pub struct TaskInvocationContext {
    module_id: ModuleId,
    root_url: String,
    timeout: Option<Duration>,
    cancel: Option<CancelSignal>,
}

impl TaskInvocationContext {
    pub fn new(module_id: impl Into<ModuleId>, root_url: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            root_url: root_url.into(),
            timeout: None,
            cancel: None,
        }
    }

    /// routine のフォームパラメータから context を作る
    ///
    /// - `moduleid` は文字列でも整数でもよい
    /// - 無い・使えない値は空 id になり、executor が `NO_RUN` にする
    pub fn from_params(params: &serde_json::Value, root_url: impl Into<String>) -> Self {
        let module_id = match params.get("moduleid") {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        Self::new(ModuleId::new(module_id), root_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn cancel(&self) -> Option<&CancelSignal> {
        self.cancel.as_ref()
    }
}
