//! Outcome of a single guess.

use derive_more::Display;

/// What the model says about an in-range guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DrawResult {
    /// The guess equals the secret.
    #[display("Correct, you guessed it!")]
    Correct,
    /// The guess is smaller than the secret.
    #[display("Too low, try a bigger number")]
    TooLow,
    /// The guess is larger than the secret.
    #[display("Too high, try a smaller number")]
    TooHigh,
}

impl DrawResult {
    /// Judges `guess` against `secret`.
    pub fn judge(guess: i32, secret: i32) -> Self {
        match guess.cmp(&secret) {
            std::cmp::Ordering::Less => Self::TooLow,
            std::cmp::Ordering::Greater => Self::TooHigh,
            std::cmp::Ordering::Equal => Self::Correct,
        }
    }

    /// Returns `true` for [`DrawResult::Correct`].
    pub fn is_win(self) -> bool {
        self == Self::Correct
    }
}
