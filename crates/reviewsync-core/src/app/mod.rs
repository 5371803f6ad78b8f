//! App - アプリケーション層
//!
//! ports を組み合わせて routine を実装し、registry 経由で公開する。
//!
//! # 主要コンポーネント
//! - **ReviewUpdateTask**: レビュー更新 routine（本体）
//! - **TaskRegistry** / **Runtime**: routine id → 実装 のディスパッチ
//! - **AppBuilder**: 登録と起動時検証

pub mod builder;
pub mod executor;
pub mod registry;
pub mod request;
pub mod response;
pub mod routine;
pub mod runtime;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::executor::ReviewUpdateTask;
pub use self::registry::TaskRegistry;
pub use self::routine::{RoutineDescriptor, TaskRoutine};
pub use self::runtime::Runtime;
