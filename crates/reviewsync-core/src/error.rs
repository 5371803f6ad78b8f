//! RuntimeError - スケジューラと routine の間のワイヤリングエラー

use thiserror::Error;

use crate::domain::TaskType;

/// Wiring errors between the scheduler and the registered routines.
/// - task の結果ではない: 実際に始まった run は必ず `ExecutionResult` で返る
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no routine registered for task_type={0}")]
    RoutineNotFound(TaskType),

    #[error("duplicate routine for task_type={0}")]
    DuplicateRoutine(TaskType),
}
