//! Draw Number application library.
//!
//! Wires one [`DrawNumber`](draw_number_model::DrawNumber) model to any
//! number of views.
//!
//! # Architecture
//!
//! - **View**: the [`DrawNumberView`] capability and its observer side
//! - **App**: [`DrawNumberApp`], the controller mediating views and model
//! - **Config file**: loading the `(min, max, attempts)` resource
//! - **Views**: [`ConsoleView`] (interactive) and [`StreamView`] (passive sink)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use draw_number::{ConfigSource, ConsoleView, DrawNumberApp, DrawNumberView, StreamView};
//!
//! # async fn example() {
//! let views: Vec<Arc<dyn DrawNumberView>> = vec![
//!     Arc::new(ConsoleView::stdio("console")),
//!     Arc::new(StreamView::new("stderr", std::io::stderr())),
//! ];
//! let app = DrawNumberApp::new(views, &ConfigSource::default());
//! app.wait_for_quit().await;
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app;
mod config_file;
mod shutdown;
mod view;
mod views;

pub mod cli;

// Crate-level exports - Controller
pub use app::DrawNumberApp;

// Crate-level exports - Configuration resource
pub use config_file::{
    CONFIG_LINES, ConfigLoadError, ConfigSource, DEFAULT_CONFIG_FILE, parse_configuration,
    read_configuration,
};

// Crate-level exports - Shutdown
pub use shutdown::ShutdownSignal;

// Crate-level exports - View capability
pub use view::{
    ATTEMPTS_EXHAUSTED, DrawNumberView, DrawNumberViewObserver, NUMBER_INCORRECT, ObserverSlot,
};

// Crate-level exports - Concrete views
pub use views::{ConsoleCommand, ConsoleView, StreamView, ViewError};

// Crate-level exports - Game model
pub use draw_number_model::{
    Configuration, ConfigurationBuilder, DrawNumber, DrawNumberError, DrawNumberErrorKind,
    DrawNumberImpl, DrawResult, GamePhase,
};
