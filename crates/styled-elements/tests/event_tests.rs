//! Tests for listener ordering, failure isolation and declared event sets.

use std::sync::Arc;

use parking_lot::Mutex;
use styled_elements::widget::widgets::{ButtonOptions, StyledButton};
use styled_elements::widget::StyledElement;
use styled_elements::{Document, Error, Event, EventTable, ObjectWithEvents};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_listeners_fire_in_registration_order() {
    init_tracing();
    let event: Event<u32> = Event::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for tag in ["a", "b", "c", "d"] {
        let seen = seen.clone();
        event.add_listener(move |value: &u32| seen.lock().push(format!("{tag}{value}")));
    }

    event.dispatch(&1);
    event.dispatch(&2);
    assert_eq!(*seen.lock(), vec!["a1", "b1", "c1", "d1", "a2", "b2", "c2", "d2"]);
}

#[test]
fn test_panicking_listener_does_not_stop_dispatch() {
    init_tracing();
    let event: Event<()> = Event::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let first = seen.clone();
    event.add_listener(move |_| first.lock().push("first"));
    event.add_listener(|_| panic!("listener failure"));
    let last = seen.clone();
    event.add_listener(move |_| last.lock().push("last"));

    event.dispatch(&());
    event.dispatch(&());
    assert_eq!(*seen.lock(), vec!["first", "last", "first", "last"]);
}

#[test]
fn test_removed_listener_stops_firing() {
    let event: Event<()> = Event::new();
    let count = Arc::new(Mutex::new(0));
    let counter = count.clone();
    let id = event.add_listener(move |_| *counter.lock() += 1);

    event.dispatch(&());
    assert!(event.remove_listener(id));
    assert!(!event.remove_listener(id));
    event.dispatch(&());
    assert_eq!(*count.lock(), 1);
}

#[test]
fn test_undeclared_event_names_fail() {
    let table: EventTable<()> = EventTable::new(&["change"]);
    assert!(matches!(
        table.add_event_listener("changed", |_| {}),
        Err(Error::UnknownEvent { .. })
    ));
    assert!(table.dispatch("changed", &()).is_err());

    // Declared but without listeners: a no-op.
    assert!(table.dispatch("change", &()).is_ok());
}

#[test]
fn test_widget_rejects_undeclared_event() {
    let doc = Document::headless();
    let button = StyledButton::new(&doc, ButtonOptions::text("Save"));
    assert!(button.add_event_listener("change", |_| {}).is_err());

    let clicks = Arc::new(Mutex::new(0));
    let counter = clicks.clone();
    button.add_event_listener("click", move |_| *counter.lock() += 1).unwrap();
    button.click();
    assert_eq!(*clicks.lock(), 1);
}

#[test]
fn test_destroyed_widget_reports_destroyed() {
    let doc = Document::headless();
    let mut button = StyledButton::new(&doc, ButtonOptions::text("Save"));
    button.destroy();
    assert!(matches!(
        button.add_event_listener("click", |_| {}),
        Err(Error::Destroyed)
    ));
}
