use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::error::{AppError, AppResult};
use crate::services::settings_service::SettingsService;

pub const DEFAULT_LOG_DIRECTIVES: &str = "info,app::feed=debug,app::settings=debug";
pub const LOG_FILE_PREFIX: &str = "misboard.log";

static FILE_WRITER_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Parses engine log directives such as `"info,app::kpi=trace"`.
pub fn parse_directives(directives: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|err| AppError::other(format!("invalid log directives {directives:?}: {err}")))
}

fn resolve_filter(directives: Option<&str>) -> AppResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_directives(directives.unwrap_or(DEFAULT_LOG_DIRECTIVES)),
    }
}

/// Installs the global subscriber: a daily `misboard.log` under `log_dir`
/// plus a compact stdout layer.
///
/// `RUST_LOG` beats `directives`, which beats [`DEFAULT_LOG_DIRECTIVES`].
/// Only the first call installs anything.
pub fn init_logging(log_dir: &Path, directives: Option<&str>) -> AppResult<()> {
    if FILE_WRITER_GUARD.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;
    let filter = resolve_filter(directives)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX));
    if FILE_WRITER_GUARD.set(guard).is_err() {
        // Lost a race with a concurrent first call.
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_timer(UtcTime::rfc_3339()),
        )
        .with(fmt::layer().compact().with_target(false))
        .try_init()
        .map_err(|err| AppError::other(format!("failed to install subscriber: {err}")))?;

    info!(
        target: "app::settings",
        log_dir = %log_dir.display(),
        directives = directives.unwrap_or(DEFAULT_LOG_DIRECTIVES),
        "logging initialised"
    );
    Ok(())
}

/// Logging configured from the `logDirectives` entry of the engine settings.
pub fn init_logging_from_settings(log_dir: &Path, settings: &SettingsService) -> AppResult<()> {
    init_logging(log_dir, settings.log_directives())
}
