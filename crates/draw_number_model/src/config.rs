//! Game configuration and its builder.

use derive_new::new;
use derive_setters::Setters;
use tracing::{debug, instrument};

/// Immutable game configuration: the secret range and the attempt budget.
///
/// A configuration is only usable when [`Configuration::is_consistent`]
/// holds; the model refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Configuration {
    /// Smallest number that may be drawn or guessed.
    min: i32,
    /// Largest number that may be drawn or guessed.
    max: i32,
    /// Number of in-range guesses allowed per round.
    attempts: i32,
}

impl Configuration {
    /// Lower bound used when none is configured.
    pub const DEFAULT_MIN: i32 = 0;
    /// Upper bound used when none is configured.
    pub const DEFAULT_MAX: i32 = 100;
    /// Attempt budget used when none is configured.
    pub const DEFAULT_ATTEMPTS: i32 = 10;

    /// Smallest number that may be drawn or guessed.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Largest number that may be drawn or guessed.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of in-range guesses allowed per round.
    pub fn attempts(&self) -> i32 {
        self.attempts
    }

    /// Returns `true` iff `min < max` and `attempts > 0`.
    #[instrument]
    pub fn is_consistent(&self) -> bool {
        self.min < self.max && self.attempts > 0
    }

    /// Returns `true` if `guess` lies within `[min, max]`.
    pub fn contains(&self, guess: i32) -> bool {
        (self.min..=self.max).contains(&guess)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            attempts: Self::DEFAULT_ATTEMPTS,
        }
    }
}

/// Draft of a [`Configuration`].
///
/// Setters only record values; nothing is validated until the caller asks
/// the built [`Configuration`] whether it is consistent. Fields left unset
/// fall back to the defaults in [`ConfigurationBuilder::build`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Setters)]
#[setters(borrow_self, strip_option, prefix = "with_")]
pub struct ConfigurationBuilder {
    /// Draft lower bound.
    min: Option<i32>,
    /// Draft upper bound.
    max: Option<i32>,
    /// Draft attempt budget.
    attempts: Option<i32>,
}

impl ConfigurationBuilder {
    /// Creates an empty draft.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the draft, filling unset fields with defaults. Never fails.
    #[instrument]
    pub fn build(&self) -> Configuration {
        let configuration = Configuration {
            min: self.min.unwrap_or(Configuration::DEFAULT_MIN),
            max: self.max.unwrap_or(Configuration::DEFAULT_MAX),
            attempts: self.attempts.unwrap_or(Configuration::DEFAULT_ATTEMPTS),
        };
        debug!(?configuration, "Built configuration");
        configuration
    }
}
