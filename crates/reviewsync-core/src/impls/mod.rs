//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryConfigStore** / **JsonFileConfigStore**: ConfigStore
//! - **ReqwestTransport**: 本番用 HttpTransport
//! - **StubTransport**: テスト用 HttpTransport
//! - **TracingLogSink** / **MemoryLogSink**: LogSink

pub mod inmem_config;
pub mod json_config;
pub mod log_sinks;
pub mod reqwest_transport;
pub mod stub_transport;

pub use self::inmem_config::InMemoryConfigStore;
pub use self::json_config::JsonFileConfigStore;
pub use self::log_sinks::{MemoryLogSink, TracingLogSink};
pub use self::reqwest_transport::ReqwestTransport;
pub use self::stub_transport::StubTransport;
