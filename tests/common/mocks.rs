//! Mock implementations for testing
//!
//! This module provides mock implementations of the analysis source
//! for use in integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;

use pulse_point_lib::services::{AnalysisApiError, AnalysisSource};
use pulse_point_lib::types::{AnalysisRecord, UserProfile};

mock! {
    pub Source {}

    #[async_trait]
    impl AnalysisSource for Source {
        async fn fetch_history(&self, limit: usize) -> Result<Vec<AnalysisRecord>, AnalysisApiError>;
        async fn fetch_current_user(&self) -> Result<UserProfile, AnalysisApiError>;
    }
}

/// A source that always serves the same history and profile
pub fn source_with(history: Vec<AnalysisRecord>, profile: UserProfile) -> MockSource {
    let mut source = MockSource::new();
    source
        .expect_fetch_history()
        .returning(move |limit| Ok(history.iter().take(limit).cloned().collect()));
    source
        .expect_fetch_current_user()
        .returning(move || Ok(profile.clone()));
    source
}
