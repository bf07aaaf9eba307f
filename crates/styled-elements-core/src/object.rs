//! Objects with a closed set of named events.
//!
//! Every widget declares, once, the event names it can dispatch. The
//! [`EventTable`] binds each declared name to one [`Event`] and rejects any
//! other name, so a typo in `add_event_listener("chnage", ..)` is reported
//! instead of silently registering a listener that never fires.
//!
//! # Key Types
//!
//! - [`EventTable`] - Declared names bound to events, with a destroy state
//! - [`ObjectWithEvents`] - Trait implemented by every evented widget

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::event::{Event, ListenerId};
use crate::logging::targets;

/// A fixed set of named events sharing one payload type.
///
/// Operations on a name that was not declared fail with
/// [`Error::UnknownEvent`]. After [`destroy`](Self::destroy) every operation
/// fails with [`Error::Destroyed`].
pub struct EventTable<Args> {
    declared: &'static [&'static str],
    events: Mutex<Option<HashMap<&'static str, Arc<Event<Args>>>>>,
}

impl<Args: 'static> EventTable<Args> {
    /// Create a table with one empty event per declared name.
    pub fn new(declared: &'static [&'static str]) -> Self {
        let events = declared
            .iter()
            .map(|&name| (name, Arc::new(Event::new())))
            .collect();
        Self {
            declared,
            events: Mutex::new(Some(events)),
        }
    }

    /// The names declared at construction.
    pub fn declared(&self) -> &'static [&'static str] {
        self.declared
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(&name)
    }

    pub fn is_destroyed(&self) -> bool {
        self.events.lock().is_none()
    }

    /// Look up the event bound to `name`.
    pub fn event(&self, name: &str) -> Result<Arc<Event<Args>>> {
        let events = self.events.lock();
        let events = events.as_ref().ok_or(Error::Destroyed)?;
        events
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_event(name))
    }

    pub fn add_event_listener<F>(&self, name: &str, listener: F) -> Result<ListenerId>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        Ok(self.event(name)?.add_listener(listener))
    }

    /// Remove a listener. `Ok(false)` when it was not registered on `name`.
    pub fn remove_event_listener(&self, name: &str, id: ListenerId) -> Result<bool> {
        Ok(self.event(name)?.remove_listener(id))
    }

    pub fn listener_count(&self, name: &str) -> Result<usize> {
        Ok(self.event(name)?.listener_count())
    }

    /// Dispatch `args` to every listener of `name`.
    ///
    /// The table lock is released before listeners run, so listeners may
    /// register further listeners on the same object.
    pub fn dispatch(&self, name: &str, args: &Args) -> Result<()> {
        let event = self.event(name)?;
        tracing::trace!(target: targets::OBJECT, event = name, "dispatching named event");
        event.dispatch(args);
        Ok(())
    }

    /// Dispatch from inside the owning object. A destroyed table drops the
    /// notification.
    ///
    /// The name must be declared: an undeclared one is a bug in the owner,
    /// asserted in debug builds and logged at `warn` otherwise.
    pub fn emit(&self, name: &str, args: &Args) {
        debug_assert!(self.is_declared(name), "emitted undeclared event {name:?}");
        match self.dispatch(name, args) {
            Ok(()) => {}
            Err(Error::Destroyed) => {
                tracing::trace!(target: targets::OBJECT, event = name, "notification dropped after destroy");
            }
            Err(err) => {
                tracing::warn!(target: targets::OBJECT, event = name, %err, "emitted undeclared event");
            }
        }
    }

    /// Release every event and its listeners. Calling it again is a no-op.
    pub fn destroy(&self) {
        if let Some(events) = self.events.lock().take() {
            tracing::trace!(target: targets::OBJECT, event_count = events.len(), "released event table");
            for event in events.values() {
                event.clear();
            }
        }
    }
}

impl<Args> std::fmt::Debug for EventTable<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTable")
            .field("declared", &self.declared)
            .field("destroyed", &self.events.lock().is_none())
            .finish()
    }
}

/// Implemented by objects that expose an [`EventTable`].
///
/// The provided methods forward to the table so callers can write
/// `widget.add_event_listener("change", ..)` directly.
pub trait ObjectWithEvents {
    /// Payload delivered to this object's listeners.
    type Args: 'static;

    fn events(&self) -> &EventTable<Self::Args>;

    fn add_event_listener<F>(&self, name: &str, listener: F) -> Result<ListenerId>
    where
        F: Fn(&Self::Args) + Send + Sync + 'static,
    {
        self.events().add_event_listener(name, listener)
    }

    fn remove_event_listener(&self, name: &str, id: ListenerId) -> Result<bool> {
        self.events().remove_event_listener(name, id)
    }
}

static_assertions::assert_impl_all!(EventTable<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const EVENTS: &[&str] = &["change", "close"];

    struct Sample {
        events: EventTable<u32>,
    }

    impl ObjectWithEvents for Sample {
        type Args = u32;

        fn events(&self) -> &EventTable<u32> {
            &self.events
        }
    }

    #[test]
    fn test_undeclared_name_rejected() {
        let sample = Sample {
            events: EventTable::new(EVENTS),
        };

        let err = sample.add_event_listener("chnage", |_| {}).unwrap_err();
        assert_eq!(err, Error::unknown_event("chnage"));
        assert_eq!(err.to_string(), "Unhandled event \"chnage\"");
        assert!(sample.events().dispatch("show", &1).is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "emitted undeclared event \"chnage\"")]
    fn test_emit_undeclared_name_asserts() {
        let table = EventTable::<u32>::new(EVENTS);
        table.emit("chnage", &1);
    }

    #[test]
    fn test_emit_after_destroy_is_dropped() {
        let table = EventTable::<u32>::new(EVENTS);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        table
            .add_event_listener("change", move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        table.emit("change", &1);
        table.destroy();
        table.emit("change", &1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let table = EventTable::<u32>::new(EVENTS);
        assert!(table.dispatch("close", &0).is_ok());
    }

    #[test]
    fn test_listeners_per_name() {
        let sample = Sample {
            events: EventTable::new(EVENTS),
        };
        let total = Arc::new(AtomicUsize::new(0));

        let t = total.clone();
        let id = sample
            .add_event_listener("change", move |&v| {
                t.fetch_add(v as usize, Ordering::SeqCst);
            })
            .unwrap();

        sample.events().dispatch("change", &5).unwrap();
        sample.events().dispatch("close", &100).unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 5);

        assert_eq!(sample.remove_event_listener("close", id), Ok(false));
        assert_eq!(sample.remove_event_listener("change", id), Ok(true));
        sample.events().dispatch("change", &5).unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let table = EventTable::<u32>::new(EVENTS);
        table.add_event_listener("change", |_| {}).unwrap();

        table.destroy();
        table.destroy();

        assert!(table.is_destroyed());
        assert_eq!(
            table.add_event_listener("change", |_| {}).unwrap_err(),
            Error::Destroyed
        );
        assert_eq!(table.dispatch("change", &1), Err(Error::Destroyed));
        table.emit("change", &1);
    }

    #[test]
    fn test_listener_may_subscribe_during_dispatch() {
        let table = Arc::new(EventTable::<u32>::new(EVENTS));
        let inner = table.clone();
        table
            .add_event_listener("change", move |_| {
                inner.add_event_listener("close", |_| {}).unwrap();
            })
            .unwrap();

        table.dispatch("change", &0).unwrap();
        assert_eq!(table.listener_count("close"), Ok(1));
    }
}
