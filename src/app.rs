//! Application controller mediating between the views and the model.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use draw_number_model::{
    Configuration, ConfigurationBuilder, DrawNumber, DrawNumberErrorKind, DrawNumberImpl,
    GamePhase,
};
use tracing::{debug, error, info, instrument, warn};

use crate::config_file::{ConfigSource, read_configuration};
use crate::shutdown::ShutdownSignal;
use crate::view::{DrawNumberView, DrawNumberViewObserver};

/// Single coordination point between one model and any number of views.
///
/// The controller registers itself as the observer of every view, forwards
/// guesses to the model and fans the outcome back out to every view in
/// registration order. Model access is serialized, so views may call in from
/// their own threads.
pub struct DrawNumberApp {
    model: Mutex<Box<dyn DrawNumber>>,
    views: Vec<Arc<dyn DrawNumberView>>,
    shutdown: ShutdownSignal,
}

impl DrawNumberApp {
    /// Creates the controller, reading the configuration from `source`.
    ///
    /// Configuration failures never abort startup: they are reported to
    /// every view through [`DrawNumberView::display_error`] and the game
    /// falls back to defaults.
    #[instrument(skip(views), fields(view_count = views.len()))]
    pub fn new(views: Vec<Arc<dyn DrawNumberView>>, source: &ConfigSource) -> Arc<Self> {
        let configuration = resolve_configuration(&views, source);
        let model = DrawNumberImpl::new(configuration).unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default configuration");
            broadcast(&views, |view| {
                view.display_error(&format!("{}; using the default configuration", e.kind()))
            });
            DrawNumberImpl::default()
        });
        Self::with_model(views, model)
    }

    /// Creates the controller around an already constructed model.
    ///
    /// Registers the controller on each view, then starts each view, both in
    /// the given order.
    #[instrument(skip(views, model), fields(view_count = views.len()))]
    pub fn with_model(
        views: Vec<Arc<dyn DrawNumberView>>,
        model: impl DrawNumber + 'static,
    ) -> Arc<Self> {
        info!(configuration = ?model.configuration(), "Creating DrawNumberApp");
        let app = Arc::new(Self {
            model: Mutex::new(Box::new(model)),
            views,
            shutdown: ShutdownSignal::new(),
        });

        let weak: Weak<DrawNumberApp> = Arc::downgrade(&app);
        let observer: Weak<dyn DrawNumberViewObserver> = weak;
        for view in &app.views {
            view.set_observer(observer.clone());
        }
        for view in &app.views {
            view.start();
        }
        debug!("All views started");
        app
    }

    /// Configuration of the running model.
    pub fn configuration(&self) -> Configuration {
        *self.lock_model().configuration()
    }

    /// Attempts left in the current round.
    pub fn remaining_attempts(&self) -> u32 {
        self.lock_model().remaining_attempts()
    }

    /// Returns `true` once a view has asked to quit.
    pub fn is_quit_requested(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Resolves once a view has asked to quit.
    pub async fn wait_for_quit(&self) {
        self.shutdown.wait().await;
    }

    // The lock is never held while views are notified: a view may call back
    // into the controller from `result`.
    fn lock_model(&self) -> MutexGuard<'_, Box<dyn DrawNumber>> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast(&self, notify: impl Fn(&dyn DrawNumberView)) {
        broadcast(&self.views, notify);
    }
}

impl DrawNumberViewObserver for DrawNumberApp {
    #[instrument(skip(self))]
    fn new_attempt(&self, n: i32) {
        let (outcome, exhausted) = {
            let mut model = self.lock_model();
            let outcome = model.attempt(n);
            // A spent round is closed here, win or not, so the next guess always
            // lands on a fresh round.
            let spent = outcome.is_ok() && model.phase() == GamePhase::Exhausted;
            if spent {
                model.reset();
            }
            let exhausted = spent && matches!(outcome, Ok(result) if !result.is_win());
            (outcome, exhausted)
        };

        match outcome {
            Ok(result) => {
                info!(%result, "Attempt judged");
                self.broadcast(|view| view.result(result));
                if exhausted {
                    info!("Round exhausted, new secret drawn");
                    self.broadcast(|view| view.attempts_exhausted());
                }
            }
            Err(e) => match e.kind() {
                DrawNumberErrorKind::InvalidInput { .. } => {
                    debug!(error = %e, "Guess out of range");
                    self.broadcast(|view| view.number_incorrect());
                }
                DrawNumberErrorKind::NoAttemptsRemaining
                | DrawNumberErrorKind::InconsistentConfiguration { .. } => {
                    error!(error = %e, "Model refused an attempt it should never see");
                    self.lock_model().reset();
                }
            },
        }
    }

    #[instrument(skip(self))]
    fn reset_game(&self) {
        self.lock_model().reset();
        info!("Game reset");
    }

    #[instrument(skip(self))]
    fn quit(&self) {
        info!("Quit requested");
        self.shutdown.trigger();
    }
}

impl std::fmt::Debug for DrawNumberApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawNumberApp")
            .field("views", &self.views.len())
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds the configuration from `source`, reporting load failures to `views`.
#[instrument(skip(views))]
fn resolve_configuration(views: &[Arc<dyn DrawNumberView>], source: &ConfigSource) -> Configuration {
    let mut builder = ConfigurationBuilder::new();
    if let Err(e) = read_configuration(source, &mut builder) {
        warn!(error = %e, "Configuration could not be loaded");
        broadcast(views, |view| view.display_error(&e.message));
    }
    builder.build()
}

fn broadcast(views: &[Arc<dyn DrawNumberView>], notify: impl Fn(&dyn DrawNumberView)) {
    for view in views {
        notify(view.as_ref());
    }
}

