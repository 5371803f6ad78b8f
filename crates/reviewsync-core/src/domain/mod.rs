//! Domain model - ids, invocation context, module config, outcomes, errors
//!
//! I/O を一切含まない。ports/impls/app から参照される。

pub mod config;
pub mod errors;
pub mod ids;
pub mod outcome;
pub mod task;

pub use self::config::{ModuleConfig, ReviewParams};
pub use self::errors::{ErrorKind, RunError};
pub use self::ids::{ModuleId, RunId};
pub use self::outcome::{ExecutionResult, LogEntry, Severity, TaskStatus};
pub use self::task::{CancelSignal, TaskInvocationContext, TaskType};
