//! `-v` / `GATEHOUSE_LOG_LEVEL` handling.
//!
//! The flag is a counter; the environment variable may be a count or a level
//! name. Both index into [`LEVELS`], which is also what the subscriber is
//! configured from, so a count and its name always agree.

use clap::{builder::ValueParser, Arg, ArgAction, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

pub const ENV_LOG_LEVEL: &str = "GATEHOUSE_LOG_LEVEL";

/// Verbosity count to level, quietest first.
pub const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];

/// Level for a verbosity count; counts past the table saturate at `trace`.
#[must_use]
pub fn level_for(count: u8) -> Level {
    LEVELS
        .get(usize::from(count))
        .map_or(Level::TRACE, |(_, level)| *level)
}

fn parse_level(raw: &str) -> Result<u8, String> {
    let raw = raw.trim();

    if let Ok(count) = raw.parse::<u8>() {
        return if usize::from(count) < LEVELS.len() {
            Ok(count)
        } else {
            Err(format!("log level must be 0..={}", LEVELS.len() - 1))
        };
    }

    LEVELS
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(raw))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| {
            let names: Vec<&str> = LEVELS.iter().map(|(name, _)| *name).collect();
            format!("invalid log level `{raw}`, expected one of {}", names.join(", "))
        })
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
