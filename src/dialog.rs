//! Dialog trigger: open/closed state and the single close path
//!
//! A [`DialogTrigger`] owns whether its dialog is open. Opening mounts a
//! [`CloseCoordinator`] with a snapshot of the close actions last handed down
//! by the configuration owner; every close, manual or automatic, goes through
//! [`DialogTrigger::request_close`], which drops that coordinator.

use crate::coordinator::{CloseCallback, CloseCoordinator};
use crate::lifecycle::EventSource;
use crate::types::{CloseActionSet, CloseMode, DemoLink};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Default)]
struct DialogState {
    open: bool,
    coordinator: Option<CloseCoordinator>,
}

pub struct DialogTrigger {
    state: Rc<RefCell<DialogState>>,
    close_actions: Cell<CloseActionSet>,
    source: Rc<dyn EventSource>,
    link: DemoLink,
    mode: CloseMode,
}

impl DialogTrigger {
    pub fn new(link: DemoLink, source: Rc<dyn EventSource>, mode: CloseMode) -> Self {
        DialogTrigger {
            state: Rc::new(RefCell::new(DialogState::default())),
            close_actions: Cell::new(CloseActionSet::empty()),
            source,
            link,
            mode,
        }
    }

    pub fn link(&self) -> &DemoLink {
        &self.link
    }

    pub fn close_mode(&self) -> CloseMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// Close actions the next `open()` will capture
    pub fn close_actions(&self) -> CloseActionSet {
        self.close_actions.get()
    }

    /// Receive the configuration owner's current set. A mounted coordinator keeps its snapshot.
    pub fn set_close_actions(&self, actions: CloseActionSet) {
        self.close_actions.set(actions);
    }

    /// Close actions held by the live coordinator, if any
    pub fn mounted_actions(&self) -> Option<CloseActionSet> {
        self.state
            .borrow()
            .coordinator
            .as_ref()
            .map(CloseCoordinator::actions)
    }

    /// Open the dialog. Does nothing if it is already open.
    pub fn open(&self) {
        if self.is_open() {
            tracing::debug!("Dialog for {} already open", self.link.href);
            return;
        }

        let coordinator = match self.mode {
            CloseMode::Coordinated => Some(CloseCoordinator::mount(
                Rc::clone(&self.source),
                self.close_actions.get(),
                self.close_callback(),
            )),
            CloseMode::ManualOnly => None,
        };

        let mut state = self.state.borrow_mut();
        state.open = true;
        state.coordinator = coordinator;
        tracing::info!("Dialog opened: {}", self.link.href);
    }

    /// The single close path. Unconditional and idempotent.
    pub fn request_close(&self) {
        close(&self.state);
    }

    /// Callback handed to the coordinator; holds no strong reference to the dialog
    pub fn close_callback(&self) -> CloseCallback {
        let state: Weak<RefCell<DialogState>> = Rc::downgrade(&self.state);
        Rc::new(move || {
            if let Some(state) = state.upgrade() {
                close(&state);
            }
        })
    }

    /// The user activated the in-dialog link.
    ///
    /// Runs the coordinator's click handler, then hands back the link to
    /// follow whether or not the dialog closed. Returns `None` when closed.
    pub fn click_anchor(&self) -> Option<DemoLink> {
        if !self.is_open() {
            return None;
        }

        tracing::debug!("Anchor clicked: {}", self.link.href);
        let handler = self
            .state
            .borrow()
            .coordinator
            .as_ref()
            .map(CloseCoordinator::anchor_click_handler);
        if let Some(handler) = handler {
            handler();
        }

        Some(self.link.clone())
    }
}

fn close(state: &RefCell<DialogState>) {
    let retired = {
        let mut state = state.borrow_mut();
        if !state.open {
            return;
        }
        state.open = false;
        state.coordinator.take()
    };
    tracing::info!("Dialog closed");
    // Listeners are released here, after the state borrow ends
    drop(retired);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleBus;
    use crate::types::{LifecycleKind, PageTransitionEvent, TriggerKind};

    fn link() -> DemoLink {
        DemoLink {
            href: "https://example.com".to_string(),
            anchor_text: "Example".to_string(),
            blank: false,
        }
    }

    fn trigger_with(actions: CloseActionSet) -> (Rc<LifecycleBus>, DialogTrigger) {
        let bus = Rc::new(LifecycleBus::new());
        let trigger = DialogTrigger::new(link(), bus.clone(), CloseMode::Coordinated);
        trigger.set_close_actions(actions);
        (bus, trigger)
    }

    #[test]
    fn test_starts_closed_without_listeners() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty());
        assert!(!trigger.is_open());
        assert!(trigger.mounted_actions().is_none());
        assert_eq!(bus.total_listeners(), 0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty());
        trigger.open();
        trigger.open();
        assert!(trigger.is_open());
        assert_eq!(bus.listener_count(LifecycleKind::PageHide), 1);
        assert_eq!(bus.listener_count(LifecycleKind::PageShow), 1);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty());
        trigger.request_close();
        assert!(!trigger.is_open());

        trigger.open();
        trigger.request_close();
        trigger.request_close();
        assert!(!trigger.is_open());
        assert_eq!(bus.total_listeners(), 0);
    }

    #[test]
    fn test_manual_close_releases_listeners() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty().with(TriggerKind::PageHide));
        trigger.open();
        trigger.request_close();
        assert_eq!(bus.total_listeners(), 0);
        assert_eq!(bus.dispatch(PageTransitionEvent::pagehide(true)), 0);
    }

    #[test]
    fn test_no_listener_leak_across_cycles() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty().with(TriggerKind::PageShow));
        for _ in 0..10 {
            trigger.open();
            assert_eq!(bus.total_listeners(), 2);
            bus.dispatch(PageTransitionEvent::pageshow(true));
            assert!(!trigger.is_open());
            assert_eq!(bus.total_listeners(), 0);
        }
    }

    #[test]
    fn test_scenario_pagehide_enabled_closes() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty().with(TriggerKind::PageHide));
        trigger.open();
        bus.dispatch(PageTransitionEvent::pagehide(true));
        assert!(!trigger.is_open());
    }

    #[test]
    fn test_scenario_empty_set_stays_open() {
        let (bus, trigger) = trigger_with(CloseActionSet::empty());
        trigger.open();
        bus.dispatch(PageTransitionEvent::pagehide(true));
        assert!(trigger.is_open());
    }

    #[test]
    fn test_scenario_unpersisted_pageshow_then_click() {
        let actions = CloseActionSet::empty()
            .with(TriggerKind::Click)
            .with(TriggerKind::PageShow);
        let (bus, trigger) = trigger_with(actions);
        trigger.open();

        bus.dispatch(PageTransitionEvent::pageshow(false));
        assert!(trigger.is_open());

        let followed = trigger.click_anchor();
        assert_eq!(followed, Some(link()));
        assert!(!trigger.is_open());
    }

    #[test]
    fn test_unpersisted_pagehide_never_closes() {
        let actions = CloseActionSet::empty()
            .with(TriggerKind::PageHide)
            .with(TriggerKind::PageShow)
            .with(TriggerKind::Click);
        let (bus, trigger) = trigger_with(actions);
        trigger.open();
        bus.dispatch(PageTransitionEvent::pagehide(false));
        assert!(trigger.is_open());
    }

    #[test]
    fn test_click_without_click_action_still_follows_link() {
        let (_bus, trigger) = trigger_with(CloseActionSet::empty().with(TriggerKind::PageHide));
        trigger.open();
        assert_eq!(trigger.click_anchor(), Some(link()));
        assert!(trigger.is_open());
    }

    #[test]
    fn test_snapshot_taken_at_open() {
        let (_bus, trigger) = trigger_with(CloseActionSet::empty());
        trigger.open();

        trigger.set_close_actions(CloseActionSet::empty().with(TriggerKind::Click));
        trigger.click_anchor();
        assert!(trigger.is_open());
        assert_eq!(trigger.mounted_actions(), Some(CloseActionSet::empty()));

        // Reopening picks up the new configuration
        trigger.request_close();
        trigger.open();
        trigger.click_anchor();
        assert!(!trigger.is_open());
    }

    #[test]
    fn test_no_callback_after_close_by_same_signal() {
        use std::cell::Cell;

        let bus = Rc::new(LifecycleBus::new());
        let trigger = DialogTrigger::new(link(), bus.clone(), CloseMode::Coordinated);
        trigger.set_close_actions(CloseActionSet::empty().with(TriggerKind::PageHide));
        trigger.open();

        // Observe the close path through an extra listener registered after the coordinator
        let observed = Rc::new(Cell::new(0));
        let o = Rc::clone(&observed);
        bus.add_listener(
            LifecycleKind::PageHide,
            Rc::new(move |_event: &PageTransitionEvent| o.set(o.get() + 1)),
        );

        assert_eq!(bus.dispatch(PageTransitionEvent::pagehide(true)), 2);
        assert!(!trigger.is_open());
        assert_eq!(bus.listener_count(LifecycleKind::PageHide), 1);

        // Only the observer is left; the coordinator's handler never runs again
        assert_eq!(bus.dispatch(PageTransitionEvent::pagehide(true)), 1);
        assert_eq!(observed.get(), 2);
    }

    #[test]
    fn test_manual_only_mounts_nothing() {
        let bus = Rc::new(LifecycleBus::new());
        let trigger = DialogTrigger::new(link(), bus.clone(), CloseMode::ManualOnly);
        trigger.set_close_actions(CloseActionSet::empty().with(TriggerKind::Click));
        trigger.open();

        assert_eq!(bus.total_listeners(), 0);
        assert!(trigger.mounted_actions().is_none());
        assert_eq!(trigger.click_anchor(), Some(link()));
        assert!(trigger.is_open());

        trigger.request_close();
        assert!(!trigger.is_open());
    }

    #[test]
    fn test_callback_after_trigger_dropped_is_harmless() {
        let (_bus, trigger) = trigger_with(CloseActionSet::empty());
        let callback = trigger.close_callback();
        drop(trigger);
        callback();
    }

    #[test]
    fn test_closed_dialog_ignores_anchor() {
        let (_bus, trigger) = trigger_with(CloseActionSet::empty().with(TriggerKind::Click));
        assert_eq!(trigger.click_anchor(), None);
    }
}
