mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use reviewsync_core::app::{App, AppBuilder, ReviewUpdateTask};
use reviewsync_core::config::ExecutorConfig;
use reviewsync_core::domain::{CancelSignal, ModuleId, TaskInvocationContext, TaskType};
use reviewsync_core::impls::{JsonFileConfigStore, ReqwestTransport, TracingLogSink};

use crate::logging::{LogLevel, init_logging};

/// Run Pretty Reviews update routines once, the way a scheduler would.
#[derive(Debug, Parser)]
#[command(name = "reviewsync", version, about)]
struct Cli {
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Executor config (TOML). Defaults apply when omitted.
    #[arg(long, global = true, env = "REVIEWSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Module records (JSON array of {id, module, params}).
    #[arg(long, global = true, env = "REVIEWSYNC_MODULES", default_value = "modules.json")]
    modules: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute one invocation and print the result as JSON.
    Run(RunArgs),
    /// List the routines this binary provides.
    List,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(long, default_value = ReviewUpdateTask::ROUTINE_ID)]
    task: String,

    #[arg(long, conflicts_with = "params")]
    module_id: Option<String>,

    /// Routine form parameters as JSON, e.g. '{"moduleid": 117}'.
    #[arg(long)]
    params: Option<String>,

    /// Site root the endpoint path is appended to.
    #[arg(long, env = "REVIEWSYNC_ROOT_URL")]
    root_url: String,

    /// Per-request timeout; overrides `http_timeout_secs` from the config.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level) {
        eprintln!("{e:#}");
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => ExecutorConfig::load(path)?,
        None => ExecutorConfig::default(),
    };
    let app = build_app(&cli, config)?;

    match cli.command {
        Command::List => {
            println!("{}", serde_json::to_string_pretty(&app.advertise())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(args) => run_once(&app, args).await,
    }
}

fn build_app(cli: &Cli, config: ExecutorConfig) -> Result<App> {
    let transport = ReqwestTransport::new(&config.user_agent)?;
    let task = ReviewUpdateTask::new(
        Arc::new(JsonFileConfigStore::new(&cli.modules)),
        Arc::new(transport),
        Arc::new(TracingLogSink),
        config,
    );

    let app = AppBuilder::new()
        .register(Arc::new(task))?
        .expect_tasks(&[ReviewUpdateTask::ROUTINE_ID])
        .build()?;
    Ok(app)
}

async fn run_once(app: &App, args: RunArgs) -> Result<ExitCode> {
    let mut ctx = match (&args.module_id, &args.params) {
        (Some(id), _) => TaskInvocationContext::new(ModuleId::new(id.trim()), args.root_url.as_str()),
        (None, Some(raw)) => {
            let params: serde_json::Value =
                serde_json::from_str(raw).context("--params is not valid JSON")?;
            TaskInvocationContext::from_params(&params, args.root_url.as_str())
        }
        (None, None) => TaskInvocationContext::new(ModuleId::new(""), args.root_url.as_str()),
    };
    if let Some(secs) = args.timeout_secs {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    // Ctrl-C → cancel the in-flight request
    let (cancel_tx, cancel) = CancelSignal::channel();
    ctx = ctx.with_cancel(cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let result = app
        .runtime()
        .execute(&TaskType::new(args.task), ctx)
        .await?;

    tracing::info!(
        run_id = %result.run_id,
        status = ?result.status,
        code = result.status.code(),
        "run finished"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(ExitCode::from(result.status.code() as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_to_review_routine() {
        let cli = Cli::try_parse_from([
            "reviewsync",
            "run",
            "--module-id",
            "117",
            "--root-url",
            "https://example.test",
        ])
        .unwrap();

        assert_eq!(cli.modules, PathBuf::from("modules.json"));
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.task, ReviewUpdateTask::ROUTINE_ID);
        assert_eq!(args.module_id.as_deref(), Some("117"));
        assert_eq!(args.timeout_secs, None);
    }

    #[test]
    fn module_id_and_params_conflict() {
        let err = Cli::try_parse_from([
            "reviewsync",
            "run",
            "--module-id",
            "117",
            "--params",
            r#"{"moduleid": 117}"#,
            "--root-url",
            "https://example.test",
        ])
        .unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Cli::try_parse_from([
            "reviewsync",
            "run",
            "--module-id",
            "117",
            "--root-url",
            "https://example.test",
            "--timeout-secs",
            "0",
        ])
        .unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["reviewsync", "list", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(matches!(cli.command, Command::List));
    }
}
