use std::{path::Path, sync::LazyLock};

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

/// Prefix of the rotated log files written by the CLI.
pub const CLI_PREFIX: &str = "cli";

const KEPT_LOG_FILES: usize = 5;

/// What the journal logs and where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogSettings {
    /// `None` falls back to `RUST_LOG`, and then to `debug`.
    pub level: Option<LevelFilter>,
    pub to_console: bool,
}

impl LogSettings {
    /// An explicit filter always wins. Printing to the console without one traces everything.
    pub fn from_flags(to_console: bool, filter: Option<LevelFilter>) -> Self {
        let level = filter.or(to_console.then_some(LevelFilter::TRACE));
        Self { level, to_console }
    }

    /// Filter directive limited to this crate, so dependencies stay quiet.
    fn directive(&self, env_level: Option<String>) -> String {
        let level = self
            .level
            .map(|v| v.to_string())
            .or(env_level)
            .unwrap_or_else(|| "debug".into());
        format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
    }
}

/// Logs go into a daily rotated file inside `<application_data_path>/logs`, and to stdout too
/// when [LogSettings::to_console] is set.
pub fn enable_logging(
    prefix: &str,
    application_data_path: &Path,
    settings: LogSettings,
) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(prefix)
        .build(application_data_path.join("logs"))?;

    let to_console = settings.to_console;
    let stdout = std::io::stdout.with_filter(move |_| to_console);
    let directive = settings.directive(std::env::var("RUST_LOG").ok());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(appender))
        .pretty()
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
