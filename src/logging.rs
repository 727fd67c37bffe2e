use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::LoggingConfig;
use tracing::info;

/// Installs the global subscriber: stderr at `stdout_level` and, when
/// `log_dir` is set, a daily-rolling file at `file_level`.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let stderr_filter = cfg
        .stdout_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;
    let file_filter = cfg
        .file_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;

    let stderr_layer = fmt::layer()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let file_layer = cfg.log_dir.as_ref().map(|dir| {
        let file_appender = tracing_appender::rolling::daily(dir, "pvshuffle.log");
        fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
            .with_filter(file_filter)
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    info!(log_dir = ?cfg.log_dir, "Logging initialized");
    Ok(())
}

/// Filter directives for test output. Engine events carry their own target
/// roots rather than the crate path, so each root is listed.
#[cfg(test)]
pub const TEST_DIRECTIVES: [&str; 5] = [
    "pvshuffle=debug",
    "planner=debug",
    "extent=debug",
    "layout=debug",
    "report=debug",
];

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in TEST_DIRECTIVES {
            filter = filter.add_directive(directive.parse().unwrap());
        }

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
