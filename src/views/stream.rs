//! Passive view writing one line per notification to a stream.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError, Weak};

use derive_getters::Getters;
use derive_more::{Display, Error};
use draw_number_model::DrawResult;
use tracing::{debug, info, instrument, warn};

use crate::view::{ATTEMPTS_EXHAUSTED, DrawNumberView, DrawNumberViewObserver, NUMBER_INCORRECT};

/// Failure to set up a view.
#[derive(Debug, Clone, Display, Error)]
#[display("View error: {} at {}:{}", message, file, line)]
pub struct ViewError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ViewError {
    /// Creates a new view error with caller location tracking.
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

/// View driven only by the controller's outbound messages.
///
/// It never originates guesses: [`DrawNumberView::start`] does nothing and
/// the observer is not kept.
#[derive(Getters)]
pub struct StreamView {
    /// Human-readable name of the target, used in logs.
    target: String,
    #[getter(skip)]
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamView {
    /// Creates a view writing to `writer`.
    #[instrument(skip(writer, target), fields(sink = %target.as_ref()))]
    pub fn new(target: impl AsRef<str>, writer: impl Write + Send + 'static) -> Self {
        debug!("Creating stream view");
        Self {
            target: target.as_ref().to_string(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Creates a view appending to the file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] if the file cannot be opened for appending.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ViewError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                ViewError::new(format!("Failed to open output file {}: {}", path.display(), e))
            })?;
        info!("Stream view writing to file");
        Ok(Self::new(path.display().to_string(), file))
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush()) {
            warn!(sink = %self.target, error = %e, "Failed to write to stream view");
        }
    }
}

impl DrawNumberView for StreamView {
    fn set_observer(&self, _observer: Weak<dyn DrawNumberViewObserver>) {
        debug!(sink = %self.target, "Stream view ignores its observer");
    }

    fn start(&self) {}

    #[instrument(skip(self), fields(sink = %self.target))]
    fn result(&self, result: DrawResult) {
        self.write_line(&result.to_string());
    }

    #[instrument(skip(self), fields(sink = %self.target))]
    fn number_incorrect(&self) {
        self.write_line(NUMBER_INCORRECT);
    }

    #[instrument(skip(self), fields(sink = %self.target))]
    fn display_error(&self, message: &str) {
        self.write_line(&format!("Error: {}", message));
    }

    #[instrument(skip(self), fields(sink = %self.target))]
    fn attempts_exhausted(&self) {
        self.write_line(ATTEMPTS_EXHAUSTED);
    }
}

impl std::fmt::Debug for StreamView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamView")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
