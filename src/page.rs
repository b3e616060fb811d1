//! The demo page: one dialog trigger per link plus the settings panel
//!
//! `PageSession` is the configuration owner. It holds the close-action set
//! edited through the settings checkboxes and pushes every change down to
//! its triggers; open dialogs keep the set they captured when they opened.

use crate::dialog::DialogTrigger;
use crate::lifecycle::EventSource;
use crate::types::{CloseActionSet, DemoLink, DemoVariant, TriggerKind};
use std::rc::Rc;

pub struct PageSession {
    variant: DemoVariant,
    close_actions: CloseActionSet,
    triggers: Vec<DialogTrigger>,
    pub selected_link_idx: usize,
    pub selected_setting_idx: usize,
}

impl PageSession {
    /// Build a freshly loaded page: every dialog closed, close-action set empty
    pub fn load(links: &[DemoLink], variant: DemoVariant, source: Rc<dyn EventSource>) -> Self {
        tracing::info!(
            "Loading demo page: variant={}, {} link(s)",
            variant.label(),
            links.len()
        );

        let triggers = links
            .iter()
            .cloned()
            .map(|link| DialogTrigger::new(link, Rc::clone(&source), variant.close_mode()))
            .collect();

        PageSession {
            variant,
            close_actions: CloseActionSet::empty(),
            triggers,
            selected_link_idx: 0,
            selected_setting_idx: 0,
        }
    }

    pub fn variant(&self) -> DemoVariant {
        self.variant
    }

    pub fn close_actions(&self) -> CloseActionSet {
        self.close_actions
    }

    pub fn triggers(&self) -> &[DialogTrigger] {
        &self.triggers
    }

    /// Flip one checkbox. Returns the new membership, or `None` when this
    /// variant has no settings panel.
    pub fn toggle_close_action(&mut self, kind: TriggerKind) -> Option<bool> {
        if !self.variant.is_configurable() {
            tracing::debug!("Ignoring {} toggle: variant {} is not configurable", kind, self.variant.label());
            return None;
        }

        let enabled = self.close_actions.toggle(kind);
        tracing::info!("Close action {} {} -> {}", kind, if enabled { "enabled" } else { "disabled" }, self.close_actions);
        for trigger in &self.triggers {
            trigger.set_close_actions(self.close_actions);
        }
        Some(enabled)
    }

    pub fn toggle_selected_setting(&mut self) -> Option<bool> {
        let kind = TriggerKind::ALL[self.selected_setting_idx.min(TriggerKind::ALL.len() - 1)];
        self.toggle_close_action(kind)
    }

    /// The dialog currently open, if any
    pub fn open_dialog(&self) -> Option<&DialogTrigger> {
        self.triggers.iter().find(|trigger| trigger.is_open())
    }

    pub fn has_open_dialog(&self) -> bool {
        self.open_dialog().is_some()
    }

    /// Open the selected entry's dialog. Only one dialog may be open at a time.
    pub fn open_selected(&self) -> bool {
        if self.has_open_dialog() {
            tracing::debug!("A dialog is already open");
            return false;
        }
        match self.triggers.get(self.selected_link_idx) {
            Some(trigger) => {
                trigger.open();
                true
            }
            None => false,
        }
    }

    pub fn select_next_link(&mut self) {
        if !self.triggers.is_empty() {
            self.selected_link_idx = (self.selected_link_idx + 1).min(self.triggers.len() - 1);
        }
    }

    pub fn select_previous_link(&mut self) {
        self.selected_link_idx = self.selected_link_idx.saturating_sub(1);
    }

    pub fn select_next_setting(&mut self) {
        self.selected_setting_idx = (self.selected_setting_idx + 1).min(TriggerKind::ALL.len() - 1);
    }

    pub fn select_previous_setting(&mut self) {
        self.selected_setting_idx = self.selected_setting_idx.saturating_sub(1);
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        tracing::debug!("Unloading demo page ({})", self.variant.label());
    }
}
