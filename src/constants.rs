//! Application-wide constants

/// Minimum terminal width required to run the application
pub const MIN_TERMINAL_WIDTH: u16 = 60;

/// Minimum terminal height required to run the application
pub const MIN_TERMINAL_HEIGHT: u16 = 20;

/// Frame duration in milliseconds for the UI render loop (targeting 60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// Maximum number of entries kept in the on-screen event log
pub const MAX_EVENT_LOG_ENTRIES: usize = 200;

/// Height of the event log panel, borders included
pub const EVENT_LOG_PANEL_HEIGHT: u16 = 8;

/// Modal width as a percentage of the screen
pub const MODAL_WIDTH_PERCENT: u16 = 60;

/// Modal height in rows, borders included
pub const MODAL_HEIGHT: u16 = 11;

/// How long to wait for the terminal to report its background color
pub const THEME_DETECT_TIMEOUT_MS: u64 = 100;

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "anchor_modal=debug";
