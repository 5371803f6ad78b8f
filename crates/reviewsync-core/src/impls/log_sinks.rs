//! LogSink 実装
//!
//! - TracingLogSink: `tracing` に流す（本番用）
//! - MemoryLogSink: メモリに溜める（テスト用）

use std::sync::Mutex;

use crate::domain::{LogEntry, ModuleId, RunId, Severity};
use crate::ports::LogSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, run_id: RunId, module_id: &ModuleId, entry: &LogEntry) {
        match entry.severity {
            Severity::Info => {
                tracing::info!(run_id = %run_id, module_id = %module_id, "{}", entry.message)
            }
            Severity::Error => {
                tracing::error!(run_id = %run_id, module_id = %module_id, "{}", entry.message)
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryLogSink {
    entries: Mutex<Vec<(RunId, ModuleId, LogEntry)>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(RunId, ModuleId, LogEntry)> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(_, _, e)| e.message)
            .collect()
    }
}

impl LogSink for MemoryLogSink {
    fn log(&self, run_id: RunId, module_id: &ModuleId, entry: &LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((run_id, module_id.clone(), entry.clone()));
    }
}
