use flexi_logger::{FileSpec, FlexiLoggerError, Logger, LoggerHandle, WriteMode};

const LOG_FILE_BASENAME: &str = "mood_journal";

/// Starts file-based logging. Diagnostics must go to a file because stderr
/// belongs to the terminal UI while raw mode is active.
///
/// The returned handle flushes buffered records when dropped, so `main` keeps
/// it alive for the whole session. Level defaults to `info` and can be
/// overridden through `RUST_LOG`.
pub fn init() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
}
