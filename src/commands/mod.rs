//! Command handlers
//!
//! This module contains the entry points the presentation layer calls.

pub mod dashboard_commands;
pub mod usage_commands;

pub use dashboard_commands::*;
pub use usage_commands::*;
