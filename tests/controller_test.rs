//! Tests for the DrawNumberApp controller.

mod common;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use common::{ViewEvent, as_views, model_with_secret, recording_views};
use draw_number::{
    ConfigSource, Configuration, DrawNumberApp, DrawNumberViewObserver, DrawResult,
};
use tempfile::NamedTempFile;

#[test]
fn test_views_are_wired_then_started_in_order() {
    let (journal, views) = recording_views(3);
    let _app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::default(), 50),
    );

    let calls = journal.lock().expect("Journal poisoned").clone();
    assert_eq!(
        calls,
        vec![
            (0, ViewEvent::SetObserver),
            (1, ViewEvent::SetObserver),
            (2, ViewEvent::SetObserver),
            (0, ViewEvent::Start),
            (1, ViewEvent::Start),
            (2, ViewEvent::Start),
        ]
    );
}

#[test]
fn test_result_fans_out_to_all_views_in_order() {
    let (journal, views) = recording_views(3);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::new(0, 10, 5), 3),
    );
    journal.lock().expect("Journal poisoned").clear();

    app.new_attempt(7);

    let calls = journal.lock().expect("Journal poisoned").clone();
    assert_eq!(
        calls,
        vec![
            (0, ViewEvent::Result(DrawResult::TooHigh)),
            (1, ViewEvent::Result(DrawResult::TooHigh)),
            (2, ViewEvent::Result(DrawResult::TooHigh)),
        ]
    );
    assert_eq!(app.remaining_attempts(), 4);
}

#[test]
fn test_out_of_range_guess_notifies_every_view() {
    let (_journal, views) = recording_views(2);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::new(1, 10, 3), 4),
    );

    app.new_attempt(11);
    app.new_attempt(0);

    for view in &views {
        assert_eq!(
            view.notifications(),
            vec![ViewEvent::NumberIncorrect, ViewEvent::NumberIncorrect]
        );
    }
    assert_eq!(app.remaining_attempts(), 3);
}

#[test]
fn test_exhausted_round_is_announced_and_restarted() {
    let (_journal, views) = recording_views(2);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::new(0, 10, 2), 8),
    );

    app.new_attempt(1);
    assert_eq!(app.remaining_attempts(), 1);
    app.new_attempt(9);

    for view in &views {
        assert_eq!(
            view.notifications(),
            vec![
                ViewEvent::Result(DrawResult::TooLow),
                ViewEvent::Result(DrawResult::TooHigh),
                ViewEvent::AttemptsExhausted,
            ]
        );
    }
    assert_eq!(app.remaining_attempts(), 2);
}

#[test]
fn test_winning_last_attempt_is_not_reported_as_exhausted() {
    let (_journal, views) = recording_views(1);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::new(0, 10, 1), 6),
    );

    app.new_attempt(6);
    assert_eq!(
        views[0].notifications(),
        vec![ViewEvent::Result(DrawResult::Correct)]
    );
    // The spent round is closed by the controller even though no view reset it.
    assert_eq!(app.remaining_attempts(), 1);

    app.new_attempt(3);
    let notifications = views[0].notifications();
    assert!(
        matches!(notifications.get(1), Some(ViewEvent::Result(_))),
        "{notifications:?}"
    );
    assert_eq!(app.remaining_attempts(), 1);
}

#[test]
fn test_reset_game_restores_budget_without_broadcast() {
    let (_journal, views) = recording_views(2);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::new(0, 10, 4), 5),
    );

    app.new_attempt(1);
    app.new_attempt(2);
    assert_eq!(app.remaining_attempts(), 2);

    app.reset_game();
    assert_eq!(app.remaining_attempts(), 4);
    for view in &views {
        assert_eq!(view.notifications().len(), 2);
    }
}

#[test]
fn test_unreadable_config_reports_once_and_uses_defaults() {
    let (_journal, views) = recording_views(3);
    let source = ConfigSource::Path("/no/such/dir/config.yml".into());
    let app = DrawNumberApp::new(as_views(&views), &source);

    assert_eq!(app.configuration(), Configuration::default());
    assert_eq!(app.configuration().min(), 0);
    assert_eq!(app.configuration().max(), 100);
    assert_eq!(app.configuration().attempts(), 10);
    for view in &views {
        let notifications = view.notifications();
        assert_eq!(notifications.len(), 1, "{notifications:?}");
        match &notifications[0] {
            ViewEvent::DisplayError(message) => assert!(!message.is_empty()),
            other => panic!("Expected DisplayError, got {other:?}"),
        }
    }
}

#[test]
fn test_config_file_is_applied() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "minimum: 5\nmaximum: 15\nattempts: 3").expect("Failed to write config");

    let (_journal, views) = recording_views(1);
    let app = DrawNumberApp::new(as_views(&views), &ConfigSource::Path(file.path().into()));

    assert_eq!(app.configuration(), Configuration::new(5, 15, 3));
    assert!(views[0].notifications().is_empty());
}

#[test]
fn test_inconsistent_config_falls_back_with_warning() {
    let (_journal, views) = recording_views(2);
    let source = ConfigSource::Text("minimum: 10\nmaximum: 1\nattempts: 3\n".to_string());
    let app = DrawNumberApp::new(as_views(&views), &source);

    assert_eq!(app.configuration(), Configuration::default());
    for view in &views {
        match view.notifications().as_slice() {
            [ViewEvent::DisplayError(message)] => {
                assert!(message.contains("inconsistent"), "{message}");
            }
            other => panic!("Expected one DisplayError, got {other:?}"),
        }
    }
}

#[test]
fn test_partial_config_keeps_parsed_fields() {
    let (_journal, views) = recording_views(1);
    let source = ConfigSource::Text("maximum: 40\nminimum: oops\nattempts: 3\n".to_string());
    let app = DrawNumberApp::new(as_views(&views), &source);

    assert_eq!(app.configuration(), Configuration::new(0, 40, 10));
    assert_eq!(views[0].notifications().len(), 1);
}

#[test]
fn test_partial_config_that_is_inconsistent_reports_both() {
    let (_journal, views) = recording_views(1);
    let source = ConfigSource::Text("minimum: 500\n".to_string());
    let app = DrawNumberApp::new(as_views(&views), &source);

    assert_eq!(app.configuration(), Configuration::default());
    let notifications = views[0].notifications();
    assert_eq!(notifications.len(), 2);
    assert!(
        notifications
            .iter()
            .all(|n| matches!(n, ViewEvent::DisplayError(_)))
    );
}

#[test]
fn test_views_do_not_keep_controller_alive() {
    let (_journal, views) = recording_views(1);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::default(), 1),
    );
    assert!(views[0].observer().is_some());

    drop(app);
    assert!(views[0].observer().is_none());
}

#[test]
fn test_concurrent_attempts_are_serialized() {
    let (_journal, views) = recording_views(1);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::new(0, 1000, 1000), 1000),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let app = Arc::clone(&app);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    app.new_attempt(1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Worker panicked");
    }

    assert_eq!(app.remaining_attempts(), 800);
    assert_eq!(views[0].notifications().len(), 200);
}

#[tokio::test]
async fn test_quit_raises_shutdown_signal() {
    let (_journal, views) = recording_views(1);
    let app = DrawNumberApp::with_model(
        as_views(&views),
        model_with_secret(Configuration::default(), 10),
    );
    assert!(!app.is_quit_requested());

    let observer = views[0].observer().expect("Observer should be set");
    observer.quit();

    tokio::time::timeout(Duration::from_secs(5), app.wait_for_quit())
        .await
        .expect("Quit should resolve the wait");
    assert!(app.is_quit_requested());
}
