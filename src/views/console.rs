//! Interactive console view.
//!
//! Reads whitespace-separated tokens on a background thread and turns them
//! into observer calls; renders outcomes as plain text lines.

use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::thread::{self, JoinHandle};

use draw_number_model::DrawResult;
use tracing::{debug, error, info, instrument, warn};

use crate::view::{
    ATTEMPTS_EXHAUSTED, DrawNumberView, DrawNumberViewObserver, NUMBER_INCORRECT, ObserverSlot,
};

const PROMPT: &str = "Your guess (or 'reset', 'quit'): ";
const NEW_GAME: &str = "A new number has been drawn, start guessing!";

type SharedOutput = Arc<Mutex<Box<dyn Write + Send>>>;

/// A single token typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// An integer guess.
    Guess(i32),
    /// Start a new round.
    Reset,
    /// End the session.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl ConsoleCommand {
    /// Interprets one whitespace-free token.
    pub fn parse(token: &str) -> Self {
        if let Ok(n) = token.parse() {
            return Self::Guess(n);
        }
        match token.to_ascii_lowercase().as_str() {
            "r" | "reset" => Self::Reset,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(token.to_string()),
        }
    }
}

/// Console view: reads guesses from an input and writes results to an output.
///
/// [`DrawNumberView::start`] spawns a reader thread and returns at once.
/// End of input is treated as a request to quit.
pub struct ConsoleView {
    name: String,
    input: Mutex<Option<Box<dyn BufRead + Send>>>,
    output: SharedOutput,
    observer: ObserverSlot,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl ConsoleView {
    /// Creates a console view over standard input and output.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(io::stdin()), io::stdout())
    }

    /// Creates a console view over arbitrary streams.
    #[instrument(skip_all)]
    pub fn new(
        name: impl Into<String>,
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        let name = name.into();
        debug!(view = %name, "Creating console view");
        Self {
            name,
            input: Mutex::new(Some(Box::new(input))),
            output: Arc::new(Mutex::new(Box::new(output))),
            observer: ObserverSlot::new(),
            reader: Mutex::new(None),
        }
    }

    /// Returns the view's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks until the reader thread has finished, if one was started.
    #[instrument(skip(self), fields(view = %self.name))]
    pub fn join(&self) {
        let handle = self
            .reader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            error!("Console reader thread panicked");
        }
    }

    fn say(&self, text: &str) {
        write_line(&self.output, text);
    }
}

impl DrawNumberView for ConsoleView {
    fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>) {
        self.observer.set(observer);
    }

    #[instrument(skip(self), fields(view = %self.name))]
    fn start(&self) {
        let Some(observer) = self.observer.weak() else {
            warn!("Console view started without an observer");
            return;
        };
        let Some(input) = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            warn!("Console view already started");
            return;
        };

        let output = Arc::clone(&self.output);
        let spawned = thread::Builder::new()
            .name(format!("console-{}", self.name))
            .spawn(move || read_loop(input, output, observer));
        match spawned {
            Ok(handle) => {
                info!("Console reader started");
                *self.reader.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
            }
            Err(e) => {
                error!(error = %e, "Failed to spawn console reader");
                self.say(&format!("Error: cannot read input: {}", e));
            }
        }
    }

    #[instrument(skip(self), fields(view = %self.name))]
    fn result(&self, result: DrawResult) {
        self.say(&result.to_string());
        if result.is_win() {
            self.say(NEW_GAME);
            if let Some(observer) = self.observer.get() {
                observer.reset_game();
            }
        }
    }

    fn number_incorrect(&self) {
        self.say(NUMBER_INCORRECT);
    }

    fn display_error(&self, message: &str) {
        self.say(&format!("Error: {}", message));
    }

    fn attempts_exhausted(&self) {
        self.say(ATTEMPTS_EXHAUSTED);
    }
}

impl std::fmt::Debug for ConsoleView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleView")
            .field("name", &self.name)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

fn write_text(output: &SharedOutput, text: &str) {
    let mut out = output.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        warn!(error = %e, "Failed to write console output");
    }
}

fn write_line(output: &SharedOutput, text: &str) {
    write_text(output, &format!("{}\n", text));
}

/// Reader thread body. Returns on quit, end of input, or once the observer is gone.
fn read_loop(
    mut input: Box<dyn BufRead + Send>,
    output: SharedOutput,
    observer: Weak<dyn DrawNumberViewObserver>,
) {
    let mut line = String::new();
    loop {
        write_text(&output, PROMPT);
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                info!("Console input closed");
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                write_line(&output, "Input is not valid text, try again");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read console input");
                break;
            }
        }

        for token in line.split_whitespace() {
            let Some(observer) = observer.upgrade() else {
                debug!("Observer dropped, stopping console reader");
                return;
            };
            match ConsoleCommand::parse(token) {
                ConsoleCommand::Guess(n) => observer.new_attempt(n),
                ConsoleCommand::Reset => {
                    observer.reset_game();
                    write_line(&output, NEW_GAME);
                }
                ConsoleCommand::Quit => {
                    observer.quit();
                    return;
                }
                ConsoleCommand::Unknown(token) => write_line(
                    &output,
                    &format!("'{}' is not a number, enter an integer guess", token),
                ),
            }
        }
    }

    if let Some(observer) = observer.upgrade() {
        observer.quit();
    }
}
