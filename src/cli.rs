//! Command-line interface parsing and validation
//!
//! This module handles CLI argument parsing using clap and validates
//! user inputs for correctness.

use crate::types::DemoVariant;
use clap::Parser;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "anchor-modal")]
#[command(version = "0.0.1")]
#[command(about = "Explore which lifecycle events should close a link modal", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<String>,

    /// Dialog variant to start with (overrides the config file)
    #[arg(short = 'v', long, value_enum, value_name = "VARIANT")]
    pub variant: Option<DemoVariant>,

    /// Disable the simulated back/forward cache
    #[arg(long)]
    pub no_bfcache: bool,

    /// Enable logging to specified file
    #[arg(short = 'l', long, value_name = "PATH")]
    pub log_file: Option<String>,
}

impl Cli {
    /// Validate CLI arguments
    /// Returns error if an explicit config file does not exist
    pub fn validate(&self) -> Result<(), String> {
        if let Some(config) = &self.config {
            if !Path::new(config).is_file() {
                return Err(format!("Config file not found: {}", config));
            }
        }
        if let Some(log_file) = &self.log_file {
            if log_file.trim().is_empty() {
                return Err("Log file path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}
