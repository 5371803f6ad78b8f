//! LogSink port - run のログ出力先
//!
//! fire-and-forget。1 回の run 内での順序は呼び出し順のまま保たれる前提。

use crate::domain::{LogEntry, ModuleId, RunId};

/// Where run log entries go besides the `ExecutionResult`.
pub trait LogSink: Send + Sync {
    fn log(&self, run_id: RunId, module_id: &ModuleId, entry: &LogEntry);
}
