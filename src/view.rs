//! View capability and the observer side of the view/controller protocol.

use std::sync::{Arc, OnceLock, Weak};

use draw_number_model::DrawResult;
use tracing::{debug, instrument, warn};

/// Notice shown when a guess falls outside the configured range.
pub const NUMBER_INCORRECT: &str = "Incorrect number: it is outside the allowed range";

/// Notice shown when a round ran out of attempts.
pub const ATTEMPTS_EXHAUSTED: &str = "You lost: no attempts left, a new number has been drawn";

/// Receiver of the events a view originates.
///
/// Implemented by the controller. Views hold it only as a [`Weak`]
/// reference, so a view never keeps the controller alive.
pub trait DrawNumberViewObserver: Send + Sync {
    /// The user submitted a guess.
    fn new_attempt(&self, n: i32);

    /// The user asked for a new round.
    fn reset_game(&self);

    /// The user asked to end the session.
    fn quit(&self);
}

/// Presentation endpoint of the game.
///
/// A view may originate guesses (interactive views) or only display what
/// the controller sends it (passive sinks). Display methods must not fail:
/// a view that cannot render logs the problem and carries on.
pub trait DrawNumberView: Send + Sync {
    /// Wires the view to its observer. Called once, before [`start`](Self::start).
    fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>);

    /// Begins producing events. May return immediately or block.
    fn start(&self);

    /// Displays the outcome of a guess.
    fn result(&self, result: DrawResult);

    /// Displays the out-of-range notice.
    fn number_incorrect(&self);

    /// Displays a non-game error such as a configuration failure.
    fn display_error(&self, message: &str);

    /// Displays that the round ran out of attempts and was restarted.
    fn attempts_exhausted(&self) {}
}

/// Write-once slot holding a view's observer.
#[derive(Default)]
pub struct ObserverSlot {
    observer: OnceLock<Weak<dyn DrawNumberViewObserver>>,
}

impl ObserverSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `observer`. A second call is ignored with a warning.
    #[instrument(skip_all)]
    pub fn set(&self, observer: Weak<dyn DrawNumberViewObserver>) {
        if self.observer.set(observer).is_err() {
            warn!("Observer already set, ignoring");
        } else {
            debug!("Observer registered");
        }
    }

    /// Returns the stored weak reference, if any.
    pub fn weak(&self) -> Option<Weak<dyn DrawNumberViewObserver>> {
        self.observer.get().cloned()
    }

    /// Returns the observer if it is set and still alive.
    pub fn get(&self) -> Option<Arc<dyn DrawNumberViewObserver>> {
        self.observer.get().and_then(Weak::upgrade)
    }
}

impl std::fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSlot")
            .field("set", &self.observer.get().is_some())
            .finish()
    }
}
