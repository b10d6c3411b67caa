//! Shared test doubles: recording views and observers, in-memory streams.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex, Weak};

use draw_number::{
    Configuration, DrawNumberImpl, DrawNumberView, DrawNumberViewObserver, DrawResult,
    ObserverSlot,
};

/// Something a view was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SetObserver,
    Start,
    Result(DrawResult),
    NumberIncorrect,
    DisplayError(String),
    AttemptsExhausted,
}

/// Journal shared by several views, recording `(view id, event)` in call order.
pub type Journal = Arc<Mutex<Vec<(usize, ViewEvent)>>>;

/// View that records every call it receives.
pub struct RecordingView {
    id: usize,
    journal: Journal,
    observer: ObserverSlot,
}

impl RecordingView {
    pub fn new(id: usize, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            id,
            journal: Arc::clone(journal),
            observer: ObserverSlot::new(),
        })
    }

    /// Events received by this view only.
    pub fn events(&self) -> Vec<ViewEvent> {
        self.journal
            .lock()
            .expect("Journal poisoned")
            .iter()
            .filter(|(id, _)| *id == self.id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Events received by this view, ignoring the wiring calls.
    pub fn notifications(&self) -> Vec<ViewEvent> {
        self.events()
            .into_iter()
            .filter(|e| !matches!(e, ViewEvent::SetObserver | ViewEvent::Start))
            .collect()
    }

    /// The registered observer, if it is still alive.
    pub fn observer(&self) -> Option<Arc<dyn DrawNumberViewObserver>> {
        self.observer.get()
    }

    fn record(&self, event: ViewEvent) {
        self.journal
            .lock()
            .expect("Journal poisoned")
            .push((self.id, event));
    }
}

impl DrawNumberView for RecordingView {
    fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>) {
        self.observer.set(observer);
        self.record(ViewEvent::SetObserver);
    }

    fn start(&self) {
        self.record(ViewEvent::Start);
    }

    fn result(&self, result: DrawResult) {
        self.record(ViewEvent::Result(result));
    }

    fn number_incorrect(&self) {
        self.record(ViewEvent::NumberIncorrect);
    }

    fn display_error(&self, message: &str) {
        self.record(ViewEvent::DisplayError(message.to_string()));
    }

    fn attempts_exhausted(&self) {
        self.record(ViewEvent::AttemptsExhausted);
    }
}

/// Creates `count` recording views sharing one journal.
pub fn recording_views(count: usize) -> (Journal, Vec<Arc<RecordingView>>) {
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));
    let views = (0..count).map(|id| RecordingView::new(id, &journal)).collect();
    (journal, views)
}

/// Upcasts recording views for the controller.
pub fn as_views(views: &[Arc<RecordingView>]) -> Vec<Arc<dyn DrawNumberView>> {
    views
        .iter()
        .map(|v| Arc::clone(v) as Arc<dyn DrawNumberView>)
        .collect()
}

/// Something a view asked its observer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    NewAttempt(i32),
    ResetGame,
    Quit,
}

/// Observer that records every call it receives.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObserverEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().expect("Observer poisoned").clone()
    }

    fn record(&self, event: ObserverEvent) {
        self.events.lock().expect("Observer poisoned").push(event);
    }
}

impl DrawNumberViewObserver for RecordingObserver {
    fn new_attempt(&self, n: i32) {
        self.record(ObserverEvent::NewAttempt(n));
    }

    fn reset_game(&self) {
        self.record(ObserverEvent::ResetGame);
    }

    fn quit(&self) {
        self.record(ObserverEvent::Quit);
    }
}

/// Weak handle to `observer`, as a view would receive it.
pub fn weak_observer(observer: &Arc<RecordingObserver>) -> Weak<dyn DrawNumberViewObserver> {
    let observer: Arc<dyn DrawNumberViewObserver> = Arc::clone(observer) as _;
    Arc::downgrade(&observer)
}

/// In-memory writer whose contents stay readable after it is moved into a view.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("Buffer poisoned")).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("Buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A real model for `configuration` whose secret is `secret`.
pub fn model_with_secret(configuration: Configuration, secret: i32) -> DrawNumberImpl {
    assert!(configuration.contains(secret), "Secret must be in range");
    let mut model = DrawNumberImpl::new(configuration).expect("Configuration should be consistent");
    while model.secret() != secret {
        draw_number::DrawNumber::reset(&mut model);
    }
    model
}
