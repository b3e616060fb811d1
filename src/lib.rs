// Library exports for the binary and tests
pub mod app;
pub mod cli;
pub mod constants;
pub mod coordinator;
pub mod dialog;
pub mod error;
pub mod event_log;
pub mod lifecycle;
pub mod links;
pub mod navigation;
pub mod page;
pub mod persistence;
pub mod types;
pub mod ui;
