//! Simulated browser tab with a back/forward cache
//!
//! Following a same-tab link hides the demo page; going back shows it again.
//! With the bfcache enabled both transitions are `persisted` and the page
//! session survives. Without it the page is discarded on hide and rebuilt on
//! return, like a full reload.

use crate::lifecycle::LifecycleBus;
use crate::types::{DemoLink, PageTransitionEvent};
use std::rc::Rc;

/// What the tab is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    DemoPage,
    /// `cached` records whether the page was kept in the bfcache when it was hidden
    Away { href: String, cached: bool },
}

/// Result of following a link from a dialog
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The tab left the demo page; `persisted` tells whether the page was cached
    SameTab { href: String, persisted: bool },
    /// A new tab was opened; the demo page stays visible
    NewTab { href: String },
}

/// Result of going back to the demo page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restore {
    /// Page came back from the bfcache intact
    FromCache,
    /// Page must be loaded from scratch
    Reload,
}

pub struct BrowserTab {
    bus: Rc<LifecycleBus>,
    bfcache: bool,
    location: Location,
    opened_tabs: usize,
}

impl BrowserTab {
    pub fn new(bus: Rc<LifecycleBus>, bfcache: bool) -> Self {
        BrowserTab {
            bus,
            bfcache,
            location: Location::DemoPage,
            opened_tabs: 0,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_away(&self) -> bool {
        matches!(self.location, Location::Away { .. })
    }

    pub fn bfcache(&self) -> bool {
        self.bfcache
    }

    pub fn set_bfcache(&mut self, enabled: bool) {
        tracing::info!("bfcache {}", if enabled { "enabled" } else { "disabled" });
        self.bfcache = enabled;
    }

    /// Number of links opened in new tabs during this run
    pub fn opened_tabs(&self) -> usize {
        self.opened_tabs
    }

    /// Follow `link`. Same-tab links dispatch page-hide before the tab moves.
    pub fn follow(&mut self, link: &DemoLink) -> Navigation {
        if link.blank {
            self.opened_tabs += 1;
            tracing::info!("Opened {} in a new tab", link.href);
            return Navigation::NewTab {
                href: link.href.clone(),
            };
        }

        let persisted = self.bfcache;
        tracing::info!("Navigating to {} (persisted={})", link.href, persisted);
        self.bus.dispatch(PageTransitionEvent::pagehide(persisted));
        self.location = Location::Away {
            href: link.href.clone(),
            cached: persisted,
        };
        Navigation::SameTab {
            href: link.href.clone(),
            persisted,
        }
    }

    /// Return to the demo page. `None` if the tab is already there.
    ///
    /// The page comes back from the cache only if it was cached when hidden;
    /// toggling the bfcache while away does not change that. Page-show is not dispatched here: on a reload the caller has to
    /// build the fresh page first, then call [`BrowserTab::show_page`].
    pub fn back(&mut self) -> Option<Restore> {
        let Location::Away { href, cached } = &self.location else {
            return None;
        };
        let cached = *cached;
        tracing::info!("Going back from {} (cached={})", href, cached);
        self.location = Location::DemoPage;

        Some(if cached {
            Restore::FromCache
        } else {
            Restore::Reload
        })
    }

    /// Dispatch the page-show that completes a restore
    pub fn show_page(&self, restore: Restore) -> usize {
        self.bus
            .dispatch(PageTransitionEvent::pageshow(restore == Restore::FromCache))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{EventSource, Listener};
    use crate::types::LifecycleKind;
    use std::cell::RefCell;

    fn record(bus: &LifecycleBus) -> Rc<RefCell<Vec<PageTransitionEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        for kind in [LifecycleKind::PageHide, LifecycleKind::PageShow] {
            let s = Rc::clone(&seen);
            let listener: Listener = Rc::new(move |event: &PageTransitionEvent| s.borrow_mut().push(*event));
            bus.add_listener(kind, listener);
        }
        seen
    }

    fn same_tab() -> DemoLink {
        DemoLink {
            href: "/docs".to_string(),
            anchor_text: "Docs".to_string(),
            blank: false,
        }
    }

    #[test]
    fn test_same_tab_with_bfcache_round_trip() {
        let bus = Rc::new(LifecycleBus::new());
        let seen = record(&bus);
        let mut tab = BrowserTab::new(bus.clone(), true);

        let nav = tab.follow(&same_tab());
        assert_eq!(
            nav,
            Navigation::SameTab {
                href: "/docs".to_string(),
                persisted: true
            }
        );
        assert!(tab.is_away());

        let restore = tab.back().unwrap();
        assert_eq!(restore, Restore::FromCache);
        tab.show_page(restore);

        assert_eq!(
            *seen.borrow(),
            vec![PageTransitionEvent::pagehide(true), PageTransitionEvent::pageshow(true)]
        );
        assert_eq!(tab.location(), &Location::DemoPage);
    }

    #[test]
    fn test_without_bfcache_transitions_are_not_persisted() {
        let bus = Rc::new(LifecycleBus::new());
        let seen = record(&bus);
        let mut tab = BrowserTab::new(bus.clone(), false);

        tab.follow(&same_tab());
        let restore = tab.back().unwrap();
        assert_eq!(restore, Restore::Reload);
        tab.show_page(restore);

        assert_eq!(
            *seen.borrow(),
            vec![PageTransitionEvent::pagehide(false), PageTransitionEvent::pageshow(false)]
        );
    }

    #[test]
    fn test_new_tab_does_not_hide_page() {
        let bus = Rc::new(LifecycleBus::new());
        let seen = record(&bus);
        let mut tab = BrowserTab::new(bus.clone(), true);
        let link = DemoLink {
            blank: true,
            ..same_tab()
        };

        assert_eq!(
            tab.follow(&link),
            Navigation::NewTab {
                href: "/docs".to_string()
            }
        );
        assert!(!tab.is_away());
        assert_eq!(tab.opened_tabs(), 1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_restore_follows_cache_state_at_hide_time() {
        let bus = Rc::new(LifecycleBus::new());
        let seen = record(&bus);
        let mut tab = BrowserTab::new(bus.clone(), false);

        tab.follow(&same_tab());
        assert_eq!(
            tab.location(),
            &Location::Away {
                href: "/docs".to_string(),
                cached: false
            }
        );
        tab.set_bfcache(true);
        let restore = tab.back().unwrap();
        assert_eq!(restore, Restore::Reload);
        tab.show_page(restore);
        assert_eq!(seen.borrow().last(), Some(&PageTransitionEvent::pageshow(false)));

        // And the other way round: cached on hide, bfcache disabled while away
        tab.follow(&same_tab());
        tab.set_bfcache(false);
        assert_eq!(tab.back(), Some(Restore::FromCache));
    }

    #[test]
    fn test_back_on_demo_page_is_noop() {
        let bus = Rc::new(LifecycleBus::new());
        let mut tab = BrowserTab::new(bus, true);
        assert_eq!(tab.back(), None);
    }
}
