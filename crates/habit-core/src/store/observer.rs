//! Change notification for stores.
//!
//! Every store owns a [`Listeners`] registry and calls
//! [`Listeners::notify`] exactly once after each committed mutation. Nothing
//! is emitted for operations that turn out to be no-ops or that fail.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// What kind of persisted data changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    Categories,
    Trackers,
    Records,
}

/// Receives store change signals synchronously, on the mutating thread.
pub trait ChangeListener {
    fn on_change(&self, change: StoreChange);
}

impl<F: Fn(StoreChange)> ChangeListener for F {
    fn on_change(&self, change: StoreChange) {
        self(change);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Registry of listeners attached to one store.
#[derive(Default)]
pub struct Listeners {
    entries: RefCell<Vec<(Subscription, Rc<dyn ChangeListener>)>>,
    next_id: Cell<u64>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Rc<dyn ChangeListener>) -> Subscription {
        let subscription = Subscription(self.next_id.get());
        self.next_id.set(subscription.0 + 1);
        self.entries.borrow_mut().push((subscription, listener));
        subscription
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(id, _)| *id != subscription);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Calls every listener in subscription order.
    pub fn notify(&self, change: StoreChange) {
        // Snapshot so listeners may (un)subscribe while being notified
        let snapshot: Vec<Rc<dyn ChangeListener>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener.on_change(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_reaches_every_listener_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let listeners = Listeners::new();

        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            listeners.subscribe(Rc::new(move |change: StoreChange| {
                seen.borrow_mut().push((tag, change));
            }));
        }

        listeners.notify(StoreChange::Trackers);
        assert_eq!(
            *seen.borrow(),
            vec![
                ("first", StoreChange::Trackers),
                ("second", StoreChange::Trackers)
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(Cell::new(0));
        let listeners = Listeners::new();
        let counter = Rc::clone(&count);
        let subscription = listeners.subscribe(Rc::new(move |_: StoreChange| {
            counter.set(counter.get() + 1);
        }));

        listeners.notify(StoreChange::Records);
        assert!(listeners.unsubscribe(subscription));
        assert!(!listeners.unsubscribe(subscription));
        listeners.notify(StoreChange::Records);

        assert_eq!(count.get(), 1);
        assert!(listeners.is_empty());
    }
}
