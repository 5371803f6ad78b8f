//! AppBuilder - routine の登録とワイヤリング
//!
//! expect_tasks() で期待する routine id を宣言しておくと、
//! build() 時に「期待集合 ⊆ 登録済み集合」をチェックして起動時に失敗させる。

use std::sync::Arc;

use super::registry::TaskRegistry;
use super::routine::{RoutineDescriptor, TaskRoutine};
use super::runtime::Runtime;
use crate::domain::TaskType;
use crate::error::RuntimeError;

/// ```ignore
/// let app = AppBuilder::new()
///     .register(Arc::new(review_task))?
///     .expect_tasks(&[ReviewUpdateTask::ROUTINE_ID])
///     .build()?;
/// ```
pub struct AppBuilder {
    registry: TaskRegistry,
    expected_tasks: Option<Vec<TaskType>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing task types: {0:?}. These tasks were expected but not registered.")]
    MissingTaskTypes(Vec<String>),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            registry: TaskRegistry::new(),
            expected_tasks: None,
        }
    }

    pub fn register(mut self, routine: Arc<dyn TaskRoutine>) -> Result<Self, RuntimeError> {
        self.registry.register(routine)?;
        Ok(self)
    }

    pub fn expect_tasks(mut self, task_types: &[&str]) -> Self {
        self.expected_tasks = Some(task_types.iter().map(|t| TaskType::new(*t)).collect());
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        if let Some(expected) = &self.expected_tasks {
            let missing: Vec<String> = expected
                .iter()
                .filter(|t| self.registry.get(t).is_none())
                .map(|t| t.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingTaskTypes(missing));
            }
        }

        Ok(App {
            runtime: Runtime::new(Arc::new(self.registry)),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct App {
    runtime: Runtime,
}

impl App {
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn advertise(&self) -> Vec<RoutineDescriptor> {
        self.runtime.registry().advertise()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::registry::tests::FixedRoutine;
    use crate::domain::TaskStatus;

    #[test]
    fn test_build_success() {
        let app = AppBuilder::new()
            .register(Arc::new(FixedRoutine::new("a.one", TaskStatus::Ok)))
            .unwrap()
            .expect_tasks(&["a.one"])
            .build();
        assert!(app.is_ok());
    }

    #[test]
    fn test_build_missing_task_types() {
        let app = AppBuilder::new()
            .register(Arc::new(FixedRoutine::new("a.one", TaskStatus::Ok)))
            .unwrap()
            .expect_tasks(&["a.one", "b.two"])
            .build();
        assert!(matches!(
            app,
            Err(BuildError::MissingTaskTypes(missing)) if missing == vec!["b.two".to_string()]
        ));
    }

    #[test]
    fn test_build_no_expect_tasks() {
        let app = AppBuilder::new()
            .register(Arc::new(FixedRoutine::new("a.one", TaskStatus::Ok)))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(app.advertise().len(), 1);
    }
}
