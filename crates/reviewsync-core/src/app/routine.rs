//! TaskRoutine - スケジューラから呼ばれる名前付きルーチン
//!
//! CMS のイベント購読の代わりに、routine id → 実装 の登録制にしている。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ExecutionResult, TaskInvocationContext, TaskType};

/// What the scheduler shows when it lists available routines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDescriptor {
    pub id: TaskType,
    pub title: String,
    pub description: String,

    /// Name of the parameter form the routine expects (e.g. `prettyreviews`).
    pub form: String,
}

/// A scheduled routine with a single entry point.
/// - `run` は失敗しない: すべての失敗は `ExecutionResult` の中で返る
#[async_trait]
pub trait TaskRoutine: Send + Sync {
    fn descriptor(&self) -> &RoutineDescriptor;

    async fn run(&self, ctx: TaskInvocationContext) -> ExecutionResult;
}
