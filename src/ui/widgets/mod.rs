//! UI widget components
//!
//! This module contains the demo page panels and the popups drawn over
//! them.

pub mod event_log;
pub mod links;
pub mod popups;
pub mod settings;
