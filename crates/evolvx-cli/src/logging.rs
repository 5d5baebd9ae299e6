//! Tracing setup for the CLI.

use std::path::Path;

use evolvx_core::config::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable with `EnvFilter` directives; wins over the config.
pub const LOG_ENV: &str = "EVOLVX_LOG";

/// Installs the global subscriber.
///
/// The log file (daily rotation under `logs_dir`) receives everything the
/// filter allows. Stderr only shows warnings unless `verbose` is set or
/// `EVOLVX_LOG` is present, so command output stays readable.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole run.
pub fn init_tracing(
    settings: &LoggingSettings,
    logs_dir: Option<&Path>,
    verbose: bool,
) -> Option<WorkerGuard> {
    let env_directive = std::env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty());
    let explicit = env_directive.is_some();
    let directive = env_directive.unwrap_or_else(|| settings.level.clone());

    let stderr_directive = if verbose || explicit {
        directive.as_str()
    } else {
        "warn"
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(stderr_directive));

    let mut file_error = None;
    let (file_layer, guard) = match logs_dir.filter(|_| settings.file) {
        Some(dir) => match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("evolvx")
            .filename_suffix("log")
            .build(dir)
        {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(EnvFilter::new(&directive));
                (Some(layer), Some(guard))
            }
            Err(e) => {
                file_error = Some(e.to_string());
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("[Bootstrap] File logging disabled: {}", e);
    }
    tracing::debug!("[Bootstrap] Log filter: {}", directive);

    guard
}
