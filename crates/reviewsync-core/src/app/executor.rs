//! ReviewUpdateTask - リモート endpoint に module のレビュー更新を依頼する
//!
//! 1 回の run は一本道:
//! load config → check kind → check params → build URL → GET → check `data`
//!
//! 最初に失敗したステップが status を決める（`RunError::status` 参照）。

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use crate::app::request::build_update_url;
use crate::app::response::interpret;
use crate::app::routine::{RoutineDescriptor, TaskRoutine};
use crate::config::ExecutorConfig;
use crate::domain::{
    CancelSignal, ExecutionResult, LogEntry, ModuleId, ReviewParams, RunError, RunId,
    TaskInvocationContext, TaskStatus, TaskType,
};
use crate::ports::{
    Clock, ConfigStore, HttpResponse, HttpTransport, IdGenerator, LogSink, SystemClock,
    TransportError, UlidGenerator,
};

/// RunLog は 1 run 分の追記専用ログ。各 entry は sink にも流す
struct RunLog<'a> {
    run_id: RunId,
    module_id: ModuleId,
    sink: &'a dyn LogSink,
    entries: Vec<LogEntry>,
}

impl<'a> RunLog<'a> {
    fn new(run_id: RunId, module_id: ModuleId, sink: &'a dyn LogSink) -> Self {
        Self {
            run_id,
            module_id,
            sink,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, entry: LogEntry) {
        self.sink.log(self.run_id, &self.module_id, &entry);
        self.entries.push(entry);
    }

    fn info(&mut self, message: impl Into<String>) {
        self.push(LogEntry::info(message));
    }

    fn error(&mut self, message: impl Into<String>) {
        self.push(LogEntry::error(message));
    }
}

pub struct ReviewUpdateTask {
    descriptor: RoutineDescriptor,
    store: Arc<dyn ConfigStore>,
    transport: Arc<dyn HttpTransport>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    config: ExecutorConfig,
}

impl ReviewUpdateTask {
    pub const ROUTINE_ID: &'static str = "prettyreviews.update_reviews";

    pub fn new(
        store: Arc<dyn ConfigStore>,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn LogSink>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            descriptor: RoutineDescriptor {
                id: TaskType::new(Self::ROUTINE_ID),
                title: "Pretty Reviews - Update reviews".to_string(),
                description: "Fetch fresh reviews for a Pretty Reviews module".to_string(),
                form: "prettyreviews".to_string(),
            },
            store,
            transport,
            sink,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UlidGenerator::new(SystemClock)),
            config,
        }
    }

    /// Clock を差し替える（run id も同じ clock から生成される）
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.ids = Arc::new(UlidGenerator::new(Arc::clone(&clock)));
        self.clock = clock;
        self
    }

    /// Execute one invocation.
    /// - 失敗しない: エラーはすべて status と error レベルの log entry になる
    /// - 失敗時は `error_kind` も埋める
    pub async fn execute(&self, ctx: TaskInvocationContext) -> ExecutionResult {
        let run_id = self.ids.generate_run_id();
        let started_at = self.clock.now();
        let module_id = ctx.module_id().clone();
        let mut log = RunLog::new(run_id, module_id.clone(), self.sink.as_ref());
        let mut requests_issued = 0;

        let span = tracing::info_span!("update_reviews", run_id = %run_id, module_id = %module_id);
        let result = self
            .run_steps(&ctx, &mut log, &mut requests_issued)
            .instrument(span)
            .await;

        let (status, error_kind) = match result {
            Ok(()) => (TaskStatus::Ok, None),
            Err(err) => {
                log.error(format!("Error: {err}"));
                (err.status(), Some(err.kind()))
            }
        };

        ExecutionResult {
            run_id,
            module_id,
            status,
            log_entries: log.entries,
            requests_issued,
            error_kind,
            started_at,
            finished_at: self.clock.now(),
        }
    }

    async fn run_steps(
        &self,
        ctx: &TaskInvocationContext,
        log: &mut RunLog<'_>,
        requests_issued: &mut u32,
    ) -> Result<(), RunError> {
        let module_id = ctx.module_id();
        let params = self.load_params(module_id).await?;

        log.info(format!("Fetching reviews for moduleId {module_id}"));

        // api key と secret を含むのでログに出さない
        let url = build_update_url(ctx.root_url(), &self.config.endpoint, module_id, &params);
        let timeout = ctx.timeout().unwrap_or_else(|| self.config.http_timeout());

        if ctx.cancel().is_some_and(CancelSignal::is_cancelled) {
            return Err(RunError::TransportFailure(
                "run cancelled before the request was sent".to_string(),
            ));
        }

        let response = self.fetch(&url, timeout, ctx.cancel()).await;
        if response.as_ref().err().is_none_or(TransportError::request_left_process) {
            *requests_issued += 1;
        }
        let response = response.map_err(|e| RunError::TransportFailure(e.to_string()))?;
        tracing::debug!(status = response.status, "review endpoint answered");

        interpret(&response)?;
        log.info("Success: Reviews have been updated!");
        log.info(format!("Completed updating reviews for moduleId {module_id}"));
        Ok(())
    }

    async fn load_params(&self, module_id: &ModuleId) -> Result<ReviewParams, RunError> {
        if module_id.is_blank() {
            return Err(RunError::NotFound(module_id.clone()));
        }

        let record = self
            .store
            .load(module_id)
            .await
            .map_err(|e| RunError::StoreUnavailable(e.to_string()))?
            .ok_or_else(|| RunError::NotFound(module_id.clone()))?;

        if record.kind != self.config.expected_kind {
            return Err(RunError::KindMismatch {
                module_id: module_id.clone(),
                actual: record.kind,
            });
        }

        let decoded = record
            .decode_params()
            .map_err(|e| RunError::ParamsUnreadable(e.to_string()))?;

        ReviewParams::from_map(&decoded).map_err(|missing| RunError::ConfigIncomplete { missing })
    }

    /// GET を 1 回。`timeout` で打ち切り、呼び出し側の cancel と競争させる
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        cancel: Option<&CancelSignal>,
    ) -> Result<HttpResponse, TransportError> {
        let call = tokio::time::timeout(timeout, self.transport.get(url, timeout));

        let outcome = match cancel {
            Some(signal) => {
                tokio::select! {
                    _ = signal.clone().cancelled() => return Err(TransportError::Cancelled),
                    r = call => r,
                }
            }
            None => call.await,
        };

        outcome.unwrap_or_else(|_elapsed| Err(TransportError::Timeout(timeout)))
    }
}

#[async_trait]
impl TaskRoutine for ReviewUpdateTask {
    fn descriptor(&self) -> &RoutineDescriptor {
        &self.descriptor
    }

    async fn run(&self, ctx: TaskInvocationContext) -> ExecutionResult {
        self.execute(ctx).await
    }
}
