//! Ports - 抽象化レイヤー
//!
//! executor が外部に依存する箇所をすべて trait にしている。
//! 本番ではコンストラクタで実装を注入し、テストでは stub に差し替える。

pub mod clock;
pub mod config_store;
pub mod http_transport;
pub mod id_generator;
pub mod log_sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::config_store::{ConfigStore, StoreError};
pub use self::http_transport::{HttpResponse, HttpTransport, TransportError};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::log_sink::LogSink;
