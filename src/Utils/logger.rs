//! Logger setup for the binary. The library only emits `log` records, the
//! binary decides where they go: terminal (stderr, so JSON output on stdout stays
//! clean) and optionally a log file.
use crate::settings::Settings;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("cannot create log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialised: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

fn file_config() -> Config {
    ConfigBuilder::new().set_time_format_rfc3339().build()
}

/// Installs the global logger described by the settings. Can succeed only once per process.
pub fn init_logger(settings: &Settings) -> Result<(), LoggerError> {
    let level = settings.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &settings.log_file {
        loggers.push(WriteLogger::new(level, file_config(), File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
