//! Run log setup
//!
//! Each run truncates its log file and writes `timestamp - LEVEL - message`
//! lines to it and to the console.

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use std::path::Path;

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} - {l} - {m}{n}";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("Invalid log configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),

    #[error("Logger already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// Level from a config string, INFO when unrecognized
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Install the run logger. The returned handle lives for the whole run.
pub fn init_run_log(path: &Path, level: LevelFilter) -> Result<Handle, LoggingError> {
    let file = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(path)?;

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = LogConfig::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(level),
        )?;

    Ok(log4rs::init_config(config)?)
}
