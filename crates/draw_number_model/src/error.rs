//! Model error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Specific failure behind a [`DrawNumberError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DrawNumberErrorKind {
    /// The guess lies outside the configured range.
    #[display("guess {guess} is outside [{min}, {max}]")]
    InvalidInput {
        /// The rejected guess.
        guess: i32,
        /// Configured lower bound.
        min: i32,
        /// Configured upper bound.
        max: i32,
    },
    /// Every attempt of the current round has been used.
    #[display("no attempts remaining")]
    NoAttemptsRemaining,
    /// The configuration violates `min < max` or `attempts > 0`.
    #[display("inconsistent configuration: min={min}, max={max}, attempts={attempts}")]
    InconsistentConfiguration {
        /// Configured lower bound.
        min: i32,
        /// Configured upper bound.
        max: i32,
        /// Configured attempt budget.
        attempts: i32,
    },
}

/// Model error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Draw number error: {} at {}:{}", kind, file, line)]
pub struct DrawNumberError {
    /// What went wrong.
    pub kind: DrawNumberErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DrawNumberError {
    /// Creates a new model error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: DrawNumberErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> DrawNumberErrorKind {
        self.kind
    }
}

impl From<DrawNumberErrorKind> for DrawNumberError {
    #[track_caller]
    fn from(kind: DrawNumberErrorKind) -> Self {
        Self::new(kind)
    }
}
