//! Draw Number game logic.
//!
//! This crate holds everything that has a contract in the number-guessing
//! game and nothing that touches a terminal or a file:
//!
//! - **Configuration**: the validated `(min, max, attempts)` triple and its builder
//! - **DrawResult**: the outcome of a single in-range guess
//! - **DrawNumber**: the stateful model that draws a secret and judges guesses
//!
//! # Example
//!
//! ```
//! use draw_number_model::{ConfigurationBuilder, DrawNumber, DrawNumberImpl};
//!
//! # fn example() -> Result<(), draw_number_model::DrawNumberError> {
//! let mut builder = ConfigurationBuilder::default();
//! builder.with_min(1).with_max(10).with_attempts(3);
//!
//! let mut game = DrawNumberImpl::new(builder.build())?;
//! let outcome = game.attempt(5)?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod model;
mod result;

pub use config::{Configuration, ConfigurationBuilder};
pub use error::{DrawNumberError, DrawNumberErrorKind};
pub use model::{DrawNumber, DrawNumberImpl, GamePhase};
pub use result::DrawResult;
