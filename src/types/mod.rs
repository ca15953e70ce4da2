//! Type definitions for Pulse Point
//!
//! This module contains the data types shared by the services, including the
//! wire types of the analysis backend and the derived dashboard types.

pub mod dashboard;
pub mod record;
pub mod usage;

pub use dashboard::*;
pub use record::*;
pub use usage::*;
