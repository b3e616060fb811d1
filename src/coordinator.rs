//! Close-trigger coordination for an open dialog
//!
//! A [`CloseCoordinator`] lives exactly as long as its dialog is open. On
//! mount it registers one page-hide and one page-show listener; dropping it
//! removes both. Which signals may actually close the dialog is decided at
//! fire time against the [`CloseActionSet`] captured at mount.

use crate::lifecycle::{EventSource, Listener, ListenerId};
use crate::types::{CloseActionSet, LifecycleKind, PageTransitionEvent, TriggerKind};
use std::rc::Rc;

/// Invoked when an enabled signal asks the owner to close
pub type CloseCallback = Rc<dyn Fn()>;

/// Handler attached to the in-dialog link
pub type ClickHandler = Rc<dyn Fn() -> bool>;

/// One listener registration, released on drop
pub struct Subscription {
    source: Rc<dyn EventSource>,
    kind: LifecycleKind,
    id: ListenerId,
}

impl Subscription {
    pub fn new(source: Rc<dyn EventSource>, kind: LifecycleKind, listener: Listener) -> Self {
        let id = source.add_listener(kind, listener);
        Subscription { source, kind, id }
    }

    pub fn kind(&self) -> LifecycleKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.source.remove_listener(self.kind, self.id);
    }
}

pub struct CloseCoordinator {
    actions: CloseActionSet,
    on_anchor_click: ClickHandler,
    _pagehide: Subscription,
    _pageshow: Subscription,
}

impl CloseCoordinator {
    /// Subscribe to page-hide and page-show on `source`.
    ///
    /// Both listeners are installed whatever `actions` holds. If the second
    /// registration unwinds, the first guard is already owned and releases
    /// its listener.
    pub fn mount(source: Rc<dyn EventSource>, actions: CloseActionSet, on_close: CloseCallback) -> Self {
        tracing::debug!("CloseCoordinator mounting with close actions {}", actions);

        let pagehide = Subscription::new(
            Rc::clone(&source),
            LifecycleKind::PageHide,
            transition_listener(actions, Rc::clone(&on_close)),
        );
        let pageshow = Subscription::new(
            source,
            LifecycleKind::PageShow,
            transition_listener(actions, Rc::clone(&on_close)),
        );

        CloseCoordinator {
            actions,
            on_anchor_click: anchor_click_handler(actions, on_close),
            _pagehide: pagehide,
            _pageshow: pageshow,
        }
    }

    /// The close-action snapshot taken at mount
    pub fn actions(&self) -> CloseActionSet {
        self.actions
    }

    /// The link's click handler. Returns whether a close was requested.
    ///
    /// Handed out as a shared handle so the caller can run it without
    /// borrowing the dialog that owns this coordinator.
    pub fn anchor_click_handler(&self) -> ClickHandler {
        Rc::clone(&self.on_anchor_click)
    }
}

impl Drop for CloseCoordinator {
    fn drop(&mut self) {
        tracing::debug!("CloseCoordinator cleanup: releasing lifecycle listeners");
    }
}

fn transition_listener(actions: CloseActionSet, on_close: CloseCallback) -> Listener {
    Rc::new(move |event: &PageTransitionEvent| {
        if !event.persisted {
            // Ordinary unload or fresh load; the page itself is going away or new
            return;
        }
        let trigger = event.kind.trigger_kind();
        tracing::debug!("{} fired for a bfcache transition", trigger);
        if actions.contains(trigger) {
            tracing::info!("Closing dialog on {}", trigger);
            on_close();
        }
    })
}

fn anchor_click_handler(actions: CloseActionSet, on_close: CloseCallback) -> ClickHandler {
    Rc::new(move || {
        tracing::debug!("Anchor click received");
        if actions.contains(TriggerKind::Click) {
            tracing::info!("Closing dialog on click");
            on_close();
            true
        } else {
            false
        }
    })
}
