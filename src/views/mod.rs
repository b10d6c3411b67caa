//! Concrete views: an interactive console and a passive stream sink.

mod console;
mod stream;

pub use console::{ConsoleCommand, ConsoleView};
pub use stream::{StreamView, ViewError};
