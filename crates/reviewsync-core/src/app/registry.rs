//! TaskRegistry - routine の登録と管理
//!
//! - 初期化時に登録（mutable）
//! - 実行時は Arc で共有して参照のみ（immutable）なのでロック不要

use std::collections::HashMap;
use std::sync::Arc;

use super::routine::{RoutineDescriptor, TaskRoutine};
use crate::domain::TaskType;
use crate::error::RuntimeError;

#[derive(Default)]
pub struct TaskRegistry {
    routines: HashMap<TaskType, Arc<dyn TaskRoutine>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            routines: HashMap::new(),
        }
    }

    /// Register a routine under its descriptor id. Second registration of the
    /// same id is an error.
    pub fn register(&mut self, routine: Arc<dyn TaskRoutine>) -> Result<(), RuntimeError> {
        let task_type = routine.descriptor().id.clone();
        if self.routines.contains_key(&task_type) {
            return Err(RuntimeError::DuplicateRoutine(task_type));
        }
        self.routines.insert(task_type, routine);
        Ok(())
    }

    pub fn get(&self, task_type: &TaskType) -> Option<&Arc<dyn TaskRoutine>> {
        self.routines.get(task_type)
    }

    /// Descriptors of every routine, sorted by id (the scheduler's option list).
    pub fn advertise(&self) -> Vec<RoutineDescriptor> {
        let mut list: Vec<RoutineDescriptor> = self
            .routines
            .values()
            .map(|r| r.descriptor().clone())
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}
