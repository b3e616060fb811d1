use serde::{Deserialize, Serialize};
use std::fmt;

/// An external signal that may be wired to close the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Click,
    PageHide,
    PageShow,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 3] = [TriggerKind::Click, TriggerKind::PageHide, TriggerKind::PageShow];

    pub fn name(&self) -> &'static str {
        match self {
            TriggerKind::Click => "click",
            TriggerKind::PageHide => "pagehide",
            TriggerKind::PageShow => "pageshow",
        }
    }

    /// Human readable description for the settings panel
    pub fn description(&self) -> &'static str {
        match self {
            TriggerKind::Click => "Close when the link is clicked",
            TriggerKind::PageHide => "Close on pagehide (persisted)",
            TriggerKind::PageShow => "Close on pageshow (persisted)",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of signals allowed to close the dialog automatically.
///
/// Stored as three named flags so every [`TriggerKind`] is matched
/// exhaustively. The type is `Copy`: whoever receives a set holds a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseActionSet {
    click: bool,
    pagehide: bool,
    pageshow: bool,
}

impl CloseActionSet {
    pub const fn empty() -> Self {
        CloseActionSet {
            click: false,
            pagehide: false,
            pageshow: false,
        }
    }

    fn flag(&self, kind: TriggerKind) -> bool {
        match kind {
            TriggerKind::Click => self.click,
            TriggerKind::PageHide => self.pagehide,
            TriggerKind::PageShow => self.pageshow,
        }
    }

    fn flag_mut(&mut self, kind: TriggerKind) -> &mut bool {
        match kind {
            TriggerKind::Click => &mut self.click,
            TriggerKind::PageHide => &mut self.pagehide,
            TriggerKind::PageShow => &mut self.pageshow,
        }
    }

    pub fn contains(&self, kind: TriggerKind) -> bool {
        self.flag(kind)
    }

    pub fn insert(&mut self, kind: TriggerKind) {
        *self.flag_mut(kind) = true;
    }

    pub fn remove(&mut self, kind: TriggerKind) {
        *self.flag_mut(kind) = false;
    }

    /// Flip membership of `kind`, returning whether it is now enabled
    pub fn toggle(&mut self, kind: TriggerKind) -> bool {
        let flag = self.flag_mut(kind);
        *flag = !*flag;
        *flag
    }

    /// Builder-style insert
    pub fn with(mut self, kind: TriggerKind) -> Self {
        self.insert(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.click || self.pagehide || self.pageshow)
    }

    pub fn iter(&self) -> impl Iterator<Item = TriggerKind> + '_ {
        TriggerKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<TriggerKind> for CloseActionSet {
    fn from_iter<I: IntoIterator<Item = TriggerKind>>(iter: I) -> Self {
        let mut set = CloseActionSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Display for CloseActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|kind| kind.name()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Page lifecycle notifications carried by the event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    PageHide,
    PageShow,
}

impl LifecycleKind {
    pub fn trigger_kind(&self) -> TriggerKind {
        match self {
            LifecycleKind::PageHide => TriggerKind::PageHide,
            LifecycleKind::PageShow => TriggerKind::PageShow,
        }
    }
}

impl fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trigger_kind().name())
    }
}

/// A page-hide or page-show notification.
///
/// `persisted` is true when the page is kept in (or restored from) the
/// back/forward cache rather than destroyed or freshly loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTransitionEvent {
    pub kind: LifecycleKind,
    pub persisted: bool,
}

impl PageTransitionEvent {
    /// Build an event from a possibly absent `persisted` flag; absent means not persisted
    pub fn new(kind: LifecycleKind, persisted: Option<bool>) -> Self {
        PageTransitionEvent {
            kind,
            persisted: persisted.unwrap_or(false),
        }
    }

    pub fn pagehide(persisted: bool) -> Self {
        Self::new(LifecycleKind::PageHide, Some(persisted))
    }

    pub fn pageshow(persisted: bool) -> Self {
        Self::new(LifecycleKind::PageShow, Some(persisted))
    }
}

/// A link offered by a demo dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoLink {
    pub href: String,
    pub anchor_text: String,
    /// Open in a new tab instead of navigating the current one
    #[serde(default)]
    pub blank: bool,
}

/// Where a link leads, relative to the demo page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDestination {
    External,
    Internal,
}

/// Which close policy the demo page exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DemoVariant {
    /// Close button and backdrop; lifecycle listeners only observe
    Baseline,
    /// Close actions chosen from the settings panel
    #[default]
    Configurable,
    /// Manual close only, no listeners
    Minimal,
}

impl DemoVariant {
    pub fn close_mode(&self) -> CloseMode {
        match self {
            DemoVariant::Baseline | DemoVariant::Configurable => CloseMode::Coordinated,
            DemoVariant::Minimal => CloseMode::ManualOnly,
        }
    }

    /// Whether the settings panel drives the close-action set
    pub fn is_configurable(&self) -> bool {
        matches!(self, DemoVariant::Configurable)
    }

    pub fn next(&self) -> Self {
        match self {
            DemoVariant::Baseline => DemoVariant::Configurable,
            DemoVariant::Configurable => DemoVariant::Minimal,
            DemoVariant::Minimal => DemoVariant::Baseline,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DemoVariant::Baseline => "Baseline",
            DemoVariant::Configurable => "Configurable",
            DemoVariant::Minimal => "Minimal",
        }
    }
}

/// Whether a dialog mounts a close coordinator while open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseMode {
    Coordinated,
    ManualOnly,
}

/// How the user dismissed a dialog by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualClose {
    CloseButton,
    Backdrop,
}

impl fmt::Display for ManualClose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualClose::CloseButton => f.write_str("close button"),
            ManualClose::Backdrop => f.write_str("backdrop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FocusTarget {
    Links,
    Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiMode {
    Normal,
    Help,
    ErrorPopup(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_links")]
    pub links: Vec<DemoLink>,
    #[serde(default = "default_true")]
    pub bfcache: bool,
    #[serde(default)]
    pub default_variant: DemoVariant,
    #[serde(default = "default_true")]
    pub event_log_visible: bool,
}

fn default_true() -> bool {
    true
}

pub fn default_links() -> Vec<DemoLink> {
    vec![
        DemoLink {
            href: "https://github.com/tak-solder/modal-anchor-demo".to_string(),
            anchor_text: "Link to the GitHub repository".to_string(),
            blank: false,
        },
        DemoLink {
            href: "https://handat.hatenablog.com".to_string(),
            anchor_text: "Link to handat's blog".to_string(),
            blank: true,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            links: default_links(),
            bfcache: true,
            default_variant: DemoVariant::default(),
            event_log_visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_contains_nothing() {
        let set = CloseActionSet::empty();
        assert!(set.is_empty());
        for kind in TriggerKind::ALL {
            assert!(!set.contains(kind));
        }
        assert_eq!(set, CloseActionSet::default());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut set = CloseActionSet::empty();
        assert!(set.toggle(TriggerKind::PageShow));
        assert!(set.contains(TriggerKind::PageShow));
        assert!(!set.toggle(TriggerKind::PageShow));
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = CloseActionSet::empty();
        set.insert(TriggerKind::Click);
        set.insert(TriggerKind::Click);
        assert_eq!(set.iter().count(), 1);
        set.remove(TriggerKind::Click);
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_display_uses_canonical_names() {
        let set: CloseActionSet = [TriggerKind::PageShow, TriggerKind::Click].into_iter().collect();
        assert_eq!(set.to_string(), "{click, pageshow}");
        assert_eq!(CloseActionSet::empty().to_string(), "{}");
    }

    #[test]
    fn test_missing_persisted_flag_means_not_persisted() {
        let event = PageTransitionEvent::new(LifecycleKind::PageHide, None);
        assert!(!event.persisted);
        assert!(PageTransitionEvent::pageshow(true).persisted);
    }

    #[test]
    fn test_lifecycle_kind_maps_to_trigger() {
        assert_eq!(LifecycleKind::PageHide.trigger_kind(), TriggerKind::PageHide);
        assert_eq!(LifecycleKind::PageShow.trigger_kind(), TriggerKind::PageShow);
    }

    #[test]
    fn test_variant_cycle_and_modes() {
        assert_eq!(DemoVariant::Minimal.close_mode(), CloseMode::ManualOnly);
        assert_eq!(DemoVariant::Baseline.close_mode(), CloseMode::Coordinated);
        assert!(DemoVariant::Configurable.is_configurable());
        assert!(!DemoVariant::Baseline.is_configurable());
        assert_eq!(DemoVariant::Minimal.next(), DemoVariant::Baseline);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: Config = serde_json::from_str(r#"{"bfcache": false}"#).unwrap();
        assert!(!config.bfcache);
        assert_eq!(config.links.len(), 2);
        assert_eq!(config.default_variant, DemoVariant::Configurable);
    }
}
