//! Modal popup components
//!
//! This module contains the link dialog itself plus the help screen and
//! error messages.

pub mod error;
pub mod help;
pub mod link_modal;
