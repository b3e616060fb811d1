//! Page lifecycle event source
//!
//! The process-wide source of page-hide/page-show notifications is modelled
//! as an injectable capability so subscribers can be exercised without a
//! real browser. [`LifecycleBus`] is the single-threaded implementation the
//! application and the tests share.

use crate::types::{LifecycleKind, PageTransitionEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// A page-hide or page-show handler
pub type Listener = Rc<dyn Fn(&PageTransitionEvent)>;

/// Identity of one registration; removal must present the same id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Add/remove-listener semantics of a global lifecycle emitter
pub trait EventSource {
    fn add_listener(&self, kind: LifecycleKind, listener: Listener) -> ListenerId;

    /// Remove a registration. Returns false if `id` was not registered for `kind`.
    fn remove_listener(&self, kind: LifecycleKind, id: ListenerId) -> bool;
}

struct Registration {
    kind: LifecycleKind,
    id: ListenerId,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// In-process lifecycle emitter
#[derive(Default)]
pub struct LifecycleBus {
    inner: RefCell<BusInner>,
}

impl LifecycleBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` at every listener registered for its kind, in registration order.
    ///
    /// No borrow is held while a listener runs, so listeners may add or remove
    /// registrations. A listener removed before its turn is skipped.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: PageTransitionEvent) -> usize {
        let pending: Vec<(ListenerId, Listener)> = self
            .inner
            .borrow()
            .registrations
            .iter()
            .filter(|reg| reg.kind == event.kind)
            .map(|reg| (reg.id, Rc::clone(&reg.listener)))
            .collect();

        tracing::debug!(
            "Dispatching {} (persisted={}) to {} listener(s)",
            event.kind,
            event.persisted,
            pending.len()
        );

        let mut invoked = 0;
        for (id, listener) in pending {
            if !self.is_registered(event.kind, id) {
                tracing::debug!("Skipping listener {:?} removed during dispatch", id);
                continue;
            }
            listener(&event);
            invoked += 1;
        }
        invoked
    }

    pub fn listener_count(&self, kind: LifecycleKind) -> usize {
        self.inner
            .borrow()
            .registrations
            .iter()
            .filter(|reg| reg.kind == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    fn is_registered(&self, kind: LifecycleKind, id: ListenerId) -> bool {
        self.inner
            .borrow()
            .registrations
            .iter()
            .any(|reg| reg.kind == kind && reg.id == id)
    }
}

impl EventSource for LifecycleBus {
    fn add_listener(&self, kind: LifecycleKind, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.registrations.push(Registration { kind, id, listener });
        tracing::debug!("Registered {} listener {:?}", kind, id);
        id
    }

    fn remove_listener(&self, kind: LifecycleKind, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner
            .registrations
            .iter()
            .position(|reg| reg.kind == kind && reg.id == id)
        {
            Some(pos) => {
                inner.registrations.remove(pos);
                tracing::debug!("Removed {} listener {:?}", kind, id);
                true
            }
            None => {
                tracing::warn!("Attempted to remove unknown {} listener {:?}", kind, id);
                false
            }
        }
    }
}
