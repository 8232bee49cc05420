use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifies one listener inside a [`Subscriptions`] registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Insertion-ordered listener registry for observable values.
///
/// Listeners are notified in subscription order, which is what lets callers
/// rely on "first subscribed, first notified" when they chain observers.
/// Detaching is explicit and deterministic; clearing the registry drops every
/// listener immediately.
pub struct Subscriptions<T> {
    listeners: RefCell<IndexMap<u64, Rc<dyn Fn(&T)>>>,
    next_id: Cell<u64>,
}

impl<T> Subscriptions<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(IndexMap::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(listener));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().shift_remove(&id.0);
    }

    /// Notifies every listener with the new value, in subscription order.
    pub fn notify(&self, value: &T) {
        // Listeners may subscribe/unsubscribe from inside a notification, so
        // the borrow cannot be held across the calls.
        let listeners: Vec<(u64, Rc<dyn Fn(&T)>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();
        for (id, listener) in listeners {
            if self.listeners.borrow().contains_key(&id) {
                listener(value);
            }
        }
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T> Default for Subscriptions<T> {
    fn default() -> Self {
        Self::new()
    }
}
