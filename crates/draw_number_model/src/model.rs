//! The draw-number model: secret, attempt budget and guess judging.

use crate::{Configuration, DrawNumberError, DrawNumberErrorKind, DrawResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Observable phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// At least one attempt remains.
    Active,
    /// Every attempt of the round has been used.
    Exhausted,
}

/// Stateful game logic driven by a controller.
///
/// The trait is object safe so a controller can hold any model behind a
/// `Box<dyn DrawNumber>`.
pub trait DrawNumber: Send {
    /// Judges one guess.
    ///
    /// # Errors
    ///
    /// - [`DrawNumberErrorKind::InvalidInput`] if `guess` is outside
    ///   `[min, max]`; the attempt budget is left untouched.
    /// - [`DrawNumberErrorKind::NoAttemptsRemaining`] if the round is
    ///   already [`GamePhase::Exhausted`].
    fn attempt(&mut self, guess: i32) -> Result<DrawResult, DrawNumberError>;

    /// Draws a new secret and restores the full attempt budget.
    fn reset(&mut self);

    /// Attempts left in the current round.
    fn remaining_attempts(&self) -> u32;

    /// Configuration the model was built from.
    fn configuration(&self) -> &Configuration;

    /// Current phase, derived from the remaining attempts.
    fn phase(&self) -> GamePhase {
        if self.remaining_attempts() == 0 {
            GamePhase::Exhausted
        } else {
            GamePhase::Active
        }
    }
}

/// Default [`DrawNumber`] implementation.
///
/// The secret is drawn uniformly from the inclusive configured range with
/// the supplied generator.
#[derive(Debug)]
pub struct DrawNumberImpl<R = StdRng> {
    configuration: Configuration,
    budget: u32,
    remaining_attempts: u32,
    secret: i32,
    rng: R,
}

impl DrawNumberImpl<StdRng> {
    /// Creates a model seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`DrawNumberErrorKind::InconsistentConfiguration`] if
    /// `configuration` is not consistent.
    #[instrument]
    pub fn new(configuration: Configuration) -> Result<Self, DrawNumberError> {
        Self::with_rng(configuration, StdRng::from_os_rng())
    }
}

impl Default for DrawNumberImpl<StdRng> {
    fn default() -> Self {
        Self::from_parts(
            Configuration::default(),
            Configuration::DEFAULT_ATTEMPTS.unsigned_abs(),
            StdRng::from_os_rng(),
        )
    }
}

impl<R: Rng> DrawNumberImpl<R> {
    /// Creates a model drawing secrets from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawNumberErrorKind::InconsistentConfiguration`] if
    /// `configuration` is not consistent.
    #[instrument(skip(rng))]
    pub fn with_rng(configuration: Configuration, rng: R) -> Result<Self, DrawNumberError> {
        let budget = u32::try_from(configuration.attempts())
            .ok()
            .filter(|_| configuration.is_consistent())
            .ok_or_else(|| {
                DrawNumberError::new(DrawNumberErrorKind::InconsistentConfiguration {
                    min: configuration.min(),
                    max: configuration.max(),
                    attempts: configuration.attempts(),
                })
            })?;
        Ok(Self::from_parts(configuration, budget, rng))
    }

    fn from_parts(configuration: Configuration, budget: u32, mut rng: R) -> Self {
        let secret = rng.random_range(configuration.min()..=configuration.max());
        info!(?configuration, "New game model");
        Self {
            configuration,
            budget,
            remaining_attempts: budget,
            secret,
            rng,
        }
    }

    /// The number currently being guessed.
    ///
    /// Views never see this; it exists for diagnostics and tests.
    pub fn secret(&self) -> i32 {
        self.secret
    }
}

impl<R: Rng + Send> DrawNumber for DrawNumberImpl<R> {
    #[instrument(skip(self), fields(remaining = self.remaining_attempts))]
    fn attempt(&mut self, guess: i32) -> Result<DrawResult, DrawNumberError> {
        if !self.configuration.contains(guess) {
            return Err(DrawNumberError::new(DrawNumberErrorKind::InvalidInput {
                guess,
                min: self.configuration.min(),
                max: self.configuration.max(),
            }));
        }
        if self.remaining_attempts == 0 {
            return Err(DrawNumberError::new(
                DrawNumberErrorKind::NoAttemptsRemaining,
            ));
        }

        self.remaining_attempts -= 1;
        let result = DrawResult::judge(guess, self.secret);
        debug!(%result, remaining = self.remaining_attempts, "Attempt judged");
        Ok(result)
    }

    #[instrument(skip(self))]
    fn reset(&mut self) {
        self.secret = self
            .rng
            .random_range(self.configuration.min()..=self.configuration.max());
        self.remaining_attempts = self.budget;
        debug!(remaining = self.remaining_attempts, "Model reset");
    }

    fn remaining_attempts(&self) -> u32 {
        self.remaining_attempts
    }

    fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}
