use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn, // Default to Warn for any other value
    }
}

/// Install the global logger.
///
/// Records go to the configured log file when one is set and can be opened,
/// otherwise to stderr so stdout stays reserved for progress output.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let log_level = parse_level(config.level());

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(log_level);

    match config.file() {
        Some(file_path) => match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => {
                base_config.chain(file).apply()?;
                eprintln!("Logging to file: {file_path}");
            }
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing with stderr logging.");
                base_config.chain(std::io::stderr()).apply()?;
            }
        },
        None => base_config.chain(std::io::stderr()).apply()?,
    }

    log::info!("Logger initialized with level: {}", config.level());
    Ok(())
}
