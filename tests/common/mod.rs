//! Common test utilities and helpers
//!
//! This module provides shared test infrastructure for integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use chrono::{DateTime, TimeZone, Utc};

/// Reference instant used by every deterministic aggregation test
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}
