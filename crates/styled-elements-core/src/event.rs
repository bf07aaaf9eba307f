//! Event bus for StyledElements.
//!
//! An [`Event`] is an ordered list of listeners. Dispatching an event calls
//! every listener, in registration order, with a shared reference to the
//! event arguments. UI fan-out has to survive a misbehaving observer, so a
//! listener that panics is caught and logged, and the remaining listeners
//! still run.
//!
//! # Example
//!
//! ```
//! use styled_elements_core::Event;
//!
//! let changed = Event::<String>::new();
//!
//! let id = changed.add_listener(|text| {
//!     println!("changed to {text}");
//! });
//!
//! changed.dispatch(&"hello".to_string());
//! assert!(changed.remove_listener(id));
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifies one registered listener.
    ///
    /// Returned by [`Event::add_listener`] and used to remove that exact
    /// listener later. Ids are never reused, so a stale id simply fails to
    /// match.
    pub struct ListenerId;
}

/// A listener callback.
pub type Listener<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct ListenerList<Args> {
    slots: SlotMap<ListenerId, Listener<Args>>,
    /// Registration order. `SlotMap` iteration order is not stable under removal.
    order: Vec<ListenerId>,
}

/// An ordered list of listeners sharing one argument type.
///
/// `Event` is `Send + Sync`; all methods take `&self` so events can live
/// inside widgets that hand out shared references to their listeners.
pub struct Event<Args> {
    listeners: Mutex<ListenerList<Args>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Event<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Event<Args> {
    /// Create an event with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(ListenerList {
                slots: SlotMap::with_key(),
                order: Vec::new(),
            }),
            blocked: AtomicBool::new(false),
        }
    }

    /// Append a listener. It runs after every listener registered before it.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut list = self.listeners.lock();
        let id = list.slots.insert(Arc::new(listener));
        list.order.push(id);
        id
    }

    /// Remove a listener by id.
    ///
    /// Returns `false` when the listener was not registered (already removed,
    /// or registered on another event).
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut list = self.listeners.lock();
        if list.slots.remove(id).is_none() {
            return false;
        }
        if let Some(index) = list.order.iter().position(|&other| other == id) {
            list.order.remove(index);
        }
        true
    }

    /// Remove every listener.
    pub fn clear(&self) {
        let mut list = self.listeners.lock();
        list.slots.clear();
        list.order.clear();
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().order.len()
    }

    /// Temporarily suppress dispatch.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether dispatch is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every listener with `args`, in registration order.
    ///
    /// The listener list is snapshotted first, so listeners may add or remove
    /// listeners while running; such changes apply to the next dispatch. A
    /// panicking listener is logged and skipped.
    #[tracing::instrument(skip_all, target = "styled_elements_core::event", level = "trace")]
    pub fn dispatch(&self, args: &Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::EVENT, "event blocked, skipping dispatch");
            return;
        }

        let snapshot: Vec<Listener<Args>> = {
            let list = self.listeners.lock();
            list.order
                .iter()
                .filter_map(|id| list.slots.get(*id).cloned())
                .collect()
        };
        tracing::trace!(target: targets::EVENT, listener_count = snapshot.len(), "dispatching event");

        for (index, listener) in snapshot.iter().enumerate() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(args)));
            if let Err(payload) = outcome {
                tracing::warn!(
                    target: targets::EVENT,
                    listener = index,
                    reason = %panic_message(payload.as_ref()),
                    "listener failed during dispatch"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

static_assertions::assert_impl_all!(Event<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_dispatch_in_registration_order() {
        let event = Event::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let received = received.clone();
            event.add_listener(move |&value| {
                received.lock().push((tag, value));
            });
        }

        event.dispatch(&7);
        assert_eq!(*received.lock(), vec![("a", 7), ("b", 7), ("c", 7)]);
    }

    #[test]
    fn test_failing_listener_does_not_block_others() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let event = Event::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = calls.clone();
        event.add_listener(move |_| {
            first.fetch_add(1, Ordering::SeqCst);
        });
        event.add_listener(|_| panic!("observer bug"));
        let last = calls.clone();
        event.add_listener(move |_| {
            last.fetch_add(1, Ordering::SeqCst);
        });

        event.dispatch(&());
        event.dispatch(&());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_remove_listener() {
        let event = Event::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let id = event.add_listener(move |&value| received_clone.lock().push(value));

        event.dispatch(&1);
        assert!(event.remove_listener(id));
        assert!(!event.remove_listener(id));
        event.dispatch(&2);

        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(event.listener_count(), 0);
    }

    #[test]
    fn test_order_survives_removal_and_reinsertion() {
        let event = Event::<()>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let r = received.clone();
        let first = event.add_listener(move |_| r.lock().push(1));
        let r = received.clone();
        event.add_listener(move |_| r.lock().push(2));
        event.remove_listener(first);
        let r = received.clone();
        event.add_listener(move |_| r.lock().push(3));

        event.dispatch(&());
        assert_eq!(*received.lock(), vec![2, 3]);
    }

    #[test]
    fn test_dispatch_without_listeners_is_noop() {
        let event = Event::<i32>::new();
        event.dispatch(&1);
        assert_eq!(event.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_register_during_dispatch() {
        let event = Arc::new(Event::<()>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let event_clone = event.clone();
        let calls_clone = calls.clone();
        event.add_listener(move |_| {
            let calls = calls_clone.clone();
            event_clone.add_listener(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        });

        event.dispatch(&());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(event.listener_count(), 2);

        event.dispatch(&());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blocked_event() {
        let event = Event::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        event.add_listener(move |&value| received_clone.lock().push(value));

        event.dispatch(&1);
        event.set_blocked(true);
        event.dispatch(&2);
        event.set_blocked(false);
        event.dispatch(&3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }
}
