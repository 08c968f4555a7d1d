use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Environment variable holding a log spec, e.g. `debug` or `linktree=trace`
pub const LOG_ENV: &str = "LINKTREE_LOG";

/// Start logging to stderr. `LINKTREE_LOG` wins over the `-v` count.
///
/// Keep the returned handle alive for the life of the process.
pub fn init_logging(verbosity: u8) -> Result<LoggerHandle, FlexiLoggerError> {
    let spec = std::env::var(LOG_ENV).unwrap_or_else(|_| level_for(verbosity).to_string());
    Logger::try_with_str(spec)?.log_to_stderr().start()
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
