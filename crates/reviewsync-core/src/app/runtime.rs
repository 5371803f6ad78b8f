//! Runtime - routine id から登録済み routine へ dispatch する

use std::sync::Arc;

use super::registry::TaskRegistry;
use crate::domain::{ExecutionResult, TaskInvocationContext, TaskType};
use crate::error::RuntimeError;

/// Runtime runs one invocation by dispatching to the registered routine.
pub struct Runtime {
    registry: Arc<TaskRegistry>,
}

impl Runtime {
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Execute one invocation of `task_type`.
    ///
    /// - `Err` になるのは未登録の routine だけ
    /// - routine 内で起きたことはすべて `ExecutionResult` で返る
    pub async fn execute(
        &self,
        task_type: &TaskType,
        ctx: TaskInvocationContext,
    ) -> Result<ExecutionResult, RuntimeError> {
        let routine = self
            .registry
            .get(task_type)
            .ok_or_else(|| RuntimeError::RoutineNotFound(task_type.clone()))?;

        tracing::debug!(task_type = %task_type, module_id = %ctx.module_id(), "dispatching routine");
        Ok(routine.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::registry::tests::FixedRoutine;
    use crate::domain::TaskStatus;

    #[tokio::test]
    async fn runtime_executes_registered_routine() {
        let mut reg = TaskRegistry::new();
        reg.register(Arc::new(FixedRoutine::new("ok", TaskStatus::Ok)))
            .unwrap();

        let rt = Runtime::new(Arc::new(reg));

        let result = rt
            .execute(&TaskType::new("ok"), TaskInvocationContext::new("1", "http://h/"))
            .await
            .unwrap();
        assert_eq!(result.status, TaskStatus::Ok);
        assert_eq!(result.module_id.as_str(), "1");
    }

    #[tokio::test]
    async fn runtime_errors_when_routine_missing() {
        let rt = Runtime::new(Arc::new(TaskRegistry::new()));

        let err = rt
            .execute(&TaskType::new("missing"), TaskInvocationContext::new("1", "http://h/"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no routine"));
    }
}
