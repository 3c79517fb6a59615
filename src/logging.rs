use std::error::Error;
use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::{Log, LogColor, LogFormat, LogLevel};

/// Environment variable holding a filter directive that overrides the
/// configured level, e.g. `DINKUR_LOG=dinkur_bind=debug`.
pub const LOG_ENV: &str = "DINKUR_LOG";

/// Installs the global subscriber. Logs go to stderr so that stdout only
/// carries command output.
pub fn init(log: &Log, verbose: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let level = effective_level(log.level, verbose);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color(log.color, std::io::stderr().is_terminal()));

    match log.format {
        LogFormat::Pretty => builder.compact().without_time().with_target(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}

pub fn effective_level(level: LogLevel, verbose: bool) -> LogLevel {
    if verbose { LogLevel::Debug } else { level }
}

fn use_color(color: LogColor, is_terminal: bool) -> bool {
    match color {
        LogColor::Auto => is_terminal,
        LogColor::Always => true,
        LogColor::Never => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(effective_level(LogLevel::Error, true), LogLevel::Debug);
        assert_eq!(effective_level(LogLevel::Warn, false), LogLevel::Warn);
    }

    #[rstest]
    #[case(LogColor::Auto, true, true)]
    #[case(LogColor::Auto, false, false)]
    #[case(LogColor::Always, false, true)]
    #[case(LogColor::Never, true, false)]
    fn color_follows_setting(#[case] color: LogColor, #[case] tty: bool, #[case] expected: bool) {
        assert_eq!(use_color(color, tty), expected);
    }
}
