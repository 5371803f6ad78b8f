//! Full stack: JSON module file → registry → reqwest → local HTTP server.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use reviewsync_core::app::{AppBuilder, ReviewUpdateTask};
use reviewsync_core::config::ExecutorConfig;
use reviewsync_core::domain::{TaskInvocationContext, TaskStatus, TaskType};
use reviewsync_core::impls::{JsonFileConfigStore, MemoryLogSink, ReqwestTransport};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Answer one request with `body` and hand back the request line.
async fn serve_once(body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = sock.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);

        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        sock.write_all(reply.as_bytes()).await.unwrap();
        let _ = sock.shutdown().await;
    });

    (format!("http://{addr}/"), rx)
}

fn modules_file() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(
        br#"[
            {"id": "117", "module": "mod_prettyreviews",
             "params": "{\"cid\":\"ChIJ a&b\",\"apikey\":\"AIza-e2e\",\"reviewsort\":\"newest\",\"secret\":\"s3cr3t\"}"},
            {"id": "3", "module": "mod_menu", "params": "{}"}
        ]"#,
    )
    .unwrap();
    f
}

fn build(modules: &tempfile::NamedTempFile, sink: Arc<MemoryLogSink>) -> reviewsync_core::app::App {
    let task = ReviewUpdateTask::new(
        Arc::new(JsonFileConfigStore::new(modules.path())),
        Arc::new(ReqwestTransport::new("reviewsync-e2e").unwrap()),
        sink,
        ExecutorConfig::default(),
    );

    AppBuilder::new()
        .register(Arc::new(task))
        .unwrap()
        .expect_tasks(&[ReviewUpdateTask::ROUTINE_ID])
        .build()
        .unwrap()
}

#[tokio::test]
async fn update_succeeds_against_live_endpoint() {
    let modules = modules_file();
    let sink = Arc::new(MemoryLogSink::new());
    let app = build(&modules, sink.clone());
    let (root, request_line) = serve_once(r#"{"success":true,"message":null,"data":true}"#).await;

    let ctx = TaskInvocationContext::from_params(&serde_json::json!({"moduleid": 117}), root)
        .with_timeout(Duration::from_secs(5));
    let result = app
        .runtime()
        .execute(&TaskType::new(ReviewUpdateTask::ROUTINE_ID), ctx)
        .await
        .unwrap();

    assert_eq!(result.status, TaskStatus::Ok, "{:?}", result.log_entries);
    assert_eq!(result.requests_issued, 1);

    let line = request_line.await.unwrap();
    assert!(line.starts_with("GET /index.php?option=com_ajax&module=prettyreviews"));
    assert!(line.contains("&moduleId=117&cid=ChIJ%20a%26b&apiKey=AIza-e2e&reviewSort=newest&secret=s3cr3t "));

    assert_eq!(sink.messages().len(), result.log_entries.len());
}

#[tokio::test]
async fn refused_connection_keeps_credentials_out_of_the_log() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let modules = modules_file();
    let sink = Arc::new(MemoryLogSink::new());
    let app = build(&modules, sink.clone());

    let result = app
        .runtime()
        .execute(
            &TaskType::new(ReviewUpdateTask::ROUTINE_ID),
            TaskInvocationContext::new("117", format!("http://{addr}/")),
        )
        .await
        .unwrap();

    assert_eq!(result.status, TaskStatus::Knockout);
    assert_eq!(result.requests_issued, 1);

    let rendered = serde_json::to_string(&result).unwrap();
    for credential in ["AIza-e2e", "s3cr3t"] {
        assert!(!rendered.contains(credential), "{credential} in {rendered}");
        assert!(sink.messages().iter().all(|m| !m.contains(credential)));
    }
}

#[tokio::test]
async fn empty_root_url_sends_nothing() {
    let modules = modules_file();
    let app = build(&modules, Arc::new(MemoryLogSink::new()));

    let result = app
        .runtime()
        .execute(
            &TaskType::new(ReviewUpdateTask::ROUTINE_ID),
            TaskInvocationContext::new("117", ""),
        )
        .await
        .unwrap();

    assert_eq!(result.status, TaskStatus::Knockout);
    assert_eq!(result.requests_issued, 0);
    assert!(!serde_json::to_string(&result).unwrap().contains("s3cr3t"));
}

#[tokio::test]
async fn other_module_kind_is_skipped() {
    let modules = modules_file();
    let app = build(&modules, Arc::new(MemoryLogSink::new()));

    let result = app
        .runtime()
        .execute(
            &TaskType::new(ReviewUpdateTask::ROUTINE_ID),
            TaskInvocationContext::new("3", "http://127.0.0.1:9/"),
        )
        .await
        .unwrap();

    assert_eq!(result.status, TaskStatus::NoRun);
    assert_eq!(result.requests_issued, 0);
}

#[tokio::test]
async fn advertised_routine_uses_the_prettyreviews_form() {
    let modules = modules_file();
    let app = build(&modules, Arc::new(MemoryLogSink::new()));

    let list = app.advertise();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id.as_str(), ReviewUpdateTask::ROUTINE_ID);
    assert_eq!(list[0].form, "prettyreviews");
}
