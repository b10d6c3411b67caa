//! Loading the game configuration from a key/value text resource.
//!
//! The resource is read line by line. Only the first [`CONFIG_LINES`] lines
//! are inspected; each is expected to mention one of `minimum`, `maximum`
//! or `attempts` and to end with an integer:
//!
//! ```text
//! minimum: 1
//! maximum: 50
//! attempts: 8
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;

use derive_more::{Display, Error};
use draw_number_model::ConfigurationBuilder;
use tracing::{debug, info, instrument};

/// Number of lines inspected in a configuration resource.
pub const CONFIG_LINES: usize = 3;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

const MINIMUM_KEY: &str = "minimum";
const MAXIMUM_KEY: &str = "maximum";
const ATTEMPTS_KEY: &str = "attempts";

/// Where the game configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file on disk.
    Path(PathBuf),
    /// Configuration text held in memory.
    Text(String),
    /// No resource; every field takes its default.
    Defaults,
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

/// Failure to read or parse a configuration resource.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigLoadError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigLoadError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for ConfigLoadError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read configuration: {}", err))
    }
}

/// Reads `source` into `builder`.
///
/// Fields are written as they are parsed, so on error `builder` keeps every
/// value read before the failing line.
///
/// # Errors
///
/// Returns [`ConfigLoadError`] if the resource cannot be opened, has fewer
/// than [`CONFIG_LINES`] lines, or a recognised line does not end with an
/// integer.
#[instrument(skip(builder))]
pub fn read_configuration(
    source: &ConfigSource,
    builder: &mut ConfigurationBuilder,
) -> Result<(), ConfigLoadError> {
    match source {
        ConfigSource::Path(path) => {
            debug!(path = %path.display(), "Opening configuration file");
            let file = File::open(path).map_err(|e| {
                ConfigLoadError::new(format!(
                    "Failed to open configuration file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            parse_configuration(BufReader::new(file), builder)
        }
        ConfigSource::Text(text) => parse_configuration(Cursor::new(text.as_bytes()), builder),
        ConfigSource::Defaults => {
            debug!("No configuration resource, using defaults");
            Ok(())
        }
    }
}

/// Parses the first [`CONFIG_LINES`] lines of `reader` into `builder`.
///
/// # Errors
///
/// See [`read_configuration`].
#[instrument(skip(reader, builder))]
pub fn parse_configuration(
    mut reader: impl BufRead,
    builder: &mut ConfigurationBuilder,
) -> Result<(), ConfigLoadError> {
    let mut line = String::new();
    for index in 0..CONFIG_LINES {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(ConfigLoadError::new(format!(
                "Configuration ended after {} lines, expected {}",
                index, CONFIG_LINES
            )));
        }

        if line.contains(MINIMUM_KEY) {
            builder.with_min(parse_value(MINIMUM_KEY, &line)?);
        } else if line.contains(MAXIMUM_KEY) {
            builder.with_max(parse_value(MAXIMUM_KEY, &line)?);
        } else if line.contains(ATTEMPTS_KEY) {
            builder.with_attempts(parse_value(ATTEMPTS_KEY, &line)?);
        } else {
            debug!(index, line = line.trim_end(), "Skipping unrecognised line");
        }
    }

    info!(?builder, "Configuration parsed");
    Ok(())
}

/// Parses the last whitespace-delimited token of `line`.
fn parse_value(key: &str, line: &str) -> Result<i32, ConfigLoadError> {
    let token = last_word(line);
    token.parse().map_err(|e| {
        ConfigLoadError::new(format!("Invalid value '{}' for {}: {}", token, key, e))
    })
}

fn last_word(line: &str) -> &str {
    line.split_whitespace().next_back().unwrap_or_default()
}
