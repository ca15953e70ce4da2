//! Service layer for Pulse Point
//!
//! This module contains the aggregation and usage-limit logic, plus the
//! services that feed them with data from the analysis backend.

pub mod analysis_api_service;
pub mod dashboard_service;
pub mod history_aggregator;
pub mod usage_service;

pub use analysis_api_service::{AnalysisApiError, AnalysisApiService, AnalysisSource};
pub use dashboard_service::{DashboardError, DashboardService};
pub use history_aggregator::{
    aggregate, aggregate_in, Clock, FixedClock, HistoryAggregator, SystemClock,
};
pub use usage_service::{evaluate, UsageLimitError, UsageLimitService};
