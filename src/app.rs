use crate::event_log::{EntryKind, EventLog};
use crate::lifecycle::{EventSource, LifecycleBus};
use crate::navigation::{BrowserTab, Navigation, Restore};
use crate::page::PageSession;
use crate::types::{Config, DemoVariant, FocusTarget, ManualClose, PageTransitionEvent, TriggerKind, UiMode};
use crate::ui::theme::Theme;
use std::rc::Rc;

pub struct AppState {
    pub config: Config,
    pub bus: Rc<LifecycleBus>,
    pub tab: BrowserTab,
    /// `None` while the tab is away and the page was not kept in the bfcache
    pub page: Option<PageSession>,
    pub variant: DemoVariant,
    pub focus: FocusTarget,
    pub ui_mode: UiMode,
    pub event_log: EventLog,
    pub event_log_visible: bool,
    pub status_message: Option<String>,
    pub theme: Theme,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: Config, variant: DemoVariant, bfcache: bool, theme: Theme) -> Self {
        let bus = Rc::new(LifecycleBus::new());
        let source: Rc<dyn EventSource> = bus.clone();
        let page = PageSession::load(&config.links, variant, source);
        let tab = BrowserTab::new(Rc::clone(&bus), bfcache);
        let event_log_visible = config.event_log_visible;

        let mut app = AppState {
            config,
            bus,
            tab,
            page: Some(page),
            variant,
            focus: FocusTarget::Links,
            ui_mode: UiMode::Normal,
            event_log: EventLog::new(),
            event_log_visible,
            status_message: None,
            theme,
            should_quit: false,
        };
        app.event_log.push(
            EntryKind::Navigation,
            format!("Loaded {} page (bfcache {})", variant.label(), on_off(bfcache)),
        );
        app
    }

    fn load_page(&self) -> PageSession {
        let source: Rc<dyn EventSource> = self.bus.clone();
        PageSession::load(&self.config.links, self.variant, source)
    }

    pub fn has_open_dialog(&self) -> bool {
        self.page.as_ref().is_some_and(PageSession::has_open_dialog)
    }

    pub fn open_selected_dialog(&mut self) {
        let Some(page) = &self.page else {
            return;
        };
        if page.open_selected() {
            let message = page
                .open_dialog()
                .map(|dialog| match dialog.mounted_actions() {
                    Some(actions) => format!("Opened dialog for {} with close actions {}", dialog.link().href, actions),
                    None => format!("Opened dialog for {} (manual close only)", dialog.link().href),
                })
                .unwrap_or_default();
            self.event_log.push(EntryKind::Dialog, message);
        }
    }

    /// Close button or backdrop
    pub fn close_dialog(&mut self, how: ManualClose) {
        let Some(dialog) = self.page.as_ref().and_then(PageSession::open_dialog) else {
            return;
        };
        dialog.request_close();
        tracing::debug!("Dialog closed manually via {}", how);
        self.event_log
            .push(EntryKind::Dialog, format!("Dialog closed by {}", how));
    }

    /// Activate the link inside the open dialog, then follow it
    pub fn activate_anchor(&mut self) {
        let Some(dialog) = self.page.as_ref().and_then(PageSession::open_dialog) else {
            return;
        };
        let Some(link) = dialog.click_anchor() else {
            return;
        };
        let closed_by_click = !dialog.is_open();
        self.event_log.push(
            EntryKind::Dialog,
            if closed_by_click {
                "Anchor clicked: dialog closed by click".to_string()
            } else {
                "Anchor clicked: dialog stays open".to_string()
            },
        );

        let was_open = self.has_open_dialog();
        match self.tab.follow(&link) {
            Navigation::NewTab { href } => {
                self.status_message = Some(format!("Opened {} in a new tab", href));
                self.event_log
                    .push(EntryKind::Navigation, format!("Opened {} in a new tab", href));
            }
            Navigation::SameTab { href, persisted } => {
                self.event_log.push(
                    EntryKind::Lifecycle,
                    format!(
                        "pagehide (persisted={}){}",
                        persisted,
                        closed_suffix(was_open, self.has_open_dialog())
                    ),
                );
                if !persisted {
                    // No bfcache: the page is discarded along with its dialogs and listeners
                    self.page = None;
                    self.event_log
                        .push(EntryKind::Navigation, "Page unloaded (not cached)");
                }
                self.event_log
                    .push(EntryKind::Navigation, format!("Navigated to {}", href));
                self.status_message = None;
            }
        }
    }

    /// History back from the destination page
    pub fn go_back(&mut self) {
        let Some(restore) = self.tab.back() else {
            return;
        };

        if restore == Restore::Reload || self.page.is_none() {
            self.page = Some(self.load_page());
            self.focus = FocusTarget::Links;
        }

        let was_open = self.has_open_dialog();
        self.tab.show_page(restore);
        let persisted = restore == Restore::FromCache;
        self.event_log.push(
            EntryKind::Navigation,
            if persisted {
                "Back: page restored from bfcache"
            } else {
                "Back: page reloaded"
            },
        );
        self.event_log.push(
            EntryKind::Lifecycle,
            format!(
                "pageshow (persisted={}){}",
                persisted,
                closed_suffix(was_open, self.has_open_dialog())
            ),
        );
    }

    /// Fire a synthetic lifecycle event at the page without navigating
    pub fn inject_lifecycle(&mut self, event: PageTransitionEvent) {
        let was_open = self.has_open_dialog();
        let invoked = self.bus.dispatch(event);
        tracing::debug!("Injected {} reached {} listener(s)", event.kind, invoked);
        self.event_log.push(
            EntryKind::Lifecycle,
            format!(
                "{} (persisted={}, injected){}",
                event.kind,
                event.persisted,
                closed_suffix(was_open, self.has_open_dialog())
            ),
        );
    }

    pub fn toggle_close_action(&mut self, kind: TriggerKind) {
        let Some(page) = &mut self.page else {
            return;
        };
        match page.toggle_close_action(kind) {
            Some(enabled) => {
                let message = format!(
                    "{} {} (now {})",
                    kind,
                    if enabled { "enabled" } else { "disabled" },
                    page.close_actions()
                );
                self.event_log.push(EntryKind::Settings, message);
            }
            None => {
                self.status_message = Some(format!(
                    "{} variant has fixed close behavior",
                    self.variant.label()
                ));
            }
        }
    }

    pub fn toggle_selected_setting(&mut self) {
        let idx = self.page.as_ref().map_or(0, |page| page.selected_setting_idx);
        if let Some(kind) = TriggerKind::ALL.get(idx) {
            self.toggle_close_action(*kind);
        }
    }

    /// Switch to the next variant. Like visiting another demo page, this reloads.
    pub fn cycle_variant(&mut self) {
        self.variant = self.variant.next();
        // Unload the old page before building the new one
        self.page = None;
        self.page = Some(self.load_page());
        if !self.variant.is_configurable() {
            self.focus = FocusTarget::Links;
        }
        self.event_log.push(
            EntryKind::Navigation,
            format!("Loaded {} page", self.variant.label()),
        );
    }

    pub fn toggle_bfcache(&mut self) {
        let enabled = !self.tab.bfcache();
        self.tab.set_bfcache(enabled);
        self.event_log
            .push(EntryKind::Settings, format!("bfcache {}", on_off(enabled)));
    }

    pub fn toggle_event_log(&mut self) {
        self.event_log_visible = !self.event_log_visible;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Links if self.variant.is_configurable() => FocusTarget::Settings,
            _ => FocusTarget::Links,
        };
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.ui_mode = UiMode::ErrorPopup(message.into());
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn closed_suffix(was_open: bool, is_open: bool) -> &'static str {
    match (was_open, is_open) {
        (true, false) => ": dialog closed",
        (true, true) => ": dialog stays open",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Location;

    fn app(variant: DemoVariant, bfcache: bool) -> AppState {
        AppState::new(Config::default(), variant, bfcache, Theme::dark())
    }

    #[test]
    fn test_open_and_manual_close() {
        let mut app = app(DemoVariant::Configurable, true);
        app.open_selected_dialog();
        assert!(app.has_open_dialog());
        assert_eq!(app.bus.total_listeners(), 2);

        app.close_dialog(ManualClose::Backdrop);
        assert!(!app.has_open_dialog());
        assert_eq!(app.bus.total_listeners(), 0);
        assert_eq!(app.event_log.last().unwrap().message, "Dialog closed by backdrop");
    }

    #[test]
    fn test_same_tab_pagehide_closes_when_enabled() {
        let mut app = app(DemoVariant::Configurable, true);
        app.toggle_close_action(TriggerKind::PageHide);
        app.open_selected_dialog();
        app.activate_anchor();

        assert!(app.tab.is_away());
        assert!(!app.has_open_dialog());
        assert!(app.page.is_some());
    }

    #[test]
    fn test_back_with_pageshow_enabled_closes_restored_dialog() {
        let mut app = app(DemoVariant::Configurable, true);
        app.toggle_close_action(TriggerKind::PageShow);
        app.open_selected_dialog();
        app.activate_anchor();
        assert!(app.has_open_dialog());

        app.go_back();
        assert_eq!(app.tab.location(), &Location::DemoPage);
        assert!(!app.has_open_dialog());
    }

    #[test]
    fn test_back_without_close_actions_restores_open_dialog() {
        let mut app = app(DemoVariant::Configurable, true);
        app.open_selected_dialog();
        app.activate_anchor();
        app.go_back();
        assert!(app.has_open_dialog());
    }

    #[test]
    fn test_no_bfcache_reloads_fresh_page() {
        let mut app = app(DemoVariant::Configurable, false);
        app.toggle_close_action(TriggerKind::Click);
        app.toggle_close_action(TriggerKind::Click);
        app.toggle_close_action(TriggerKind::PageShow);
        app.open_selected_dialog();

        app.activate_anchor();
        assert!(app.page.is_none());
        assert_eq!(app.bus.total_listeners(), 0);

        app.go_back();
        let page = app.page.as_ref().unwrap();
        assert!(page.close_actions().is_empty());
        assert!(!page.has_open_dialog());
    }

    #[test]
    fn test_bfcache_toggled_while_away_keeps_hide_time_state() {
        use crate::lifecycle::{EventSource, Listener};
        use crate::types::LifecycleKind;
        use std::cell::RefCell;

        let mut app = app(DemoVariant::Configurable, false);
        let shows = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shows);
        let listener: Listener = Rc::new(move |event: &PageTransitionEvent| sink.borrow_mut().push(*event));
        app.bus.add_listener(LifecycleKind::PageShow, listener);

        app.open_selected_dialog();
        app.activate_anchor();
        assert!(app.page.is_none());

        app.toggle_bfcache();
        app.go_back();
        assert_eq!(*shows.borrow(), vec![PageTransitionEvent::pageshow(false)]);
        assert_eq!(app.event_log.last().unwrap().message, "pageshow (persisted=false)");
        assert!(!app.has_open_dialog());

        // Cached on hide, then bfcache turned off while away: still restored
        app.open_selected_dialog();
        app.activate_anchor();
        assert!(app.page.is_some());
        app.toggle_bfcache();
        app.go_back();
        assert_eq!(shows.borrow().last(), Some(&PageTransitionEvent::pageshow(true)));
        assert!(app.has_open_dialog());
    }

    #[test]
    fn test_new_tab_link_keeps_page_visible() {
        let mut app = app(DemoVariant::Configurable, true);
        app.page.as_mut().unwrap().select_next_link();
        app.open_selected_dialog();
        app.activate_anchor();

        assert!(!app.tab.is_away());
        assert!(app.has_open_dialog());
        assert_eq!(app.tab.opened_tabs(), 1);
    }

    #[test]
    fn test_click_action_closes_before_navigation() {
        let mut app = app(DemoVariant::Configurable, true);
        app.toggle_close_action(TriggerKind::Click);
        app.page.as_mut().unwrap().select_next_link();
        app.open_selected_dialog();
        app.activate_anchor();
        assert!(!app.has_open_dialog());
    }

    #[test]
    fn test_injected_events_respect_persisted_flag() {
        let mut app = app(DemoVariant::Configurable, true);
        app.toggle_close_action(TriggerKind::PageHide);
        app.open_selected_dialog();

        app.inject_lifecycle(PageTransitionEvent::pagehide(false));
        assert!(app.has_open_dialog());
        app.inject_lifecycle(PageTransitionEvent::pagehide(true));
        assert!(!app.has_open_dialog());
    }

    #[test]
    fn test_minimal_variant_never_auto_closes() {
        let mut app = app(DemoVariant::Minimal, true);
        app.toggle_close_action(TriggerKind::PageHide);
        app.open_selected_dialog();
        assert_eq!(app.bus.total_listeners(), 0);

        app.inject_lifecycle(PageTransitionEvent::pagehide(true));
        assert!(app.has_open_dialog());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_cycle_variant_unloads_open_dialog() {
        let mut app = app(DemoVariant::Configurable, true);
        app.open_selected_dialog();
        app.cycle_variant();
        assert_eq!(app.variant, DemoVariant::Minimal);
        assert!(!app.has_open_dialog());
        assert_eq!(app.bus.total_listeners(), 0);
    }

    #[test]
    fn test_focus_settings_only_when_configurable() {
        let mut app = app(DemoVariant::Baseline, true);
        app.cycle_focus();
        assert_eq!(app.focus, FocusTarget::Links);

        let mut app = self::app(DemoVariant::Configurable, true);
        app.cycle_focus();
        assert_eq!(app.focus, FocusTarget::Settings);
        app.cycle_focus();
        assert_eq!(app.focus, FocusTarget::Links);
    }
}
