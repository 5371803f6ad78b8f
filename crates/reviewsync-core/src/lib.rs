//! reviewsync-core
//!
//! スケジューラから呼ばれ、Pretty Reviews endpoint に 1 module 分のレビュー更新を依頼する。
//! 結果は `OK` / `NO_RUN` / `KNOCKOUT` とログとしてスケジューラに返す。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, context, module config, outcome, errors）
//! - **ports**: 抽象化レイヤー（ConfigStore, HttpTransport, LogSink, Clock, IdGenerator）
//! - **impls**: ports の実装（reqwest, JSON ファイル, in-memory, stub）
//! - **app**: ReviewUpdateTask, registry, runtime, builder
//! - **config**: ExecutorConfig（TOML）

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;
