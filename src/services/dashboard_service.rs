//! Dashboard service composing the history feed, aggregation and usage limits

use std::sync::Arc;

use thiserror::Error;

use crate::services::analysis_api_service::{AnalysisApiError, AnalysisSource};
use crate::services::history_aggregator::HistoryAggregator;
use crate::services::usage_service::{UsageLimitError, UsageLimitService};
use crate::types::{DashboardSnapshot, UsageOverview};

/// Number of topics and emotions listed on the dashboard
pub const TOP_ENTRIES: usize = 5;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load dashboard data: {0}")]
    Source(#[from] AnalysisApiError),
    #[error("Usage limits misconfigured: {0}")]
    Limits(#[from] UsageLimitError),
}

pub struct DashboardService {
    source: Arc<dyn AnalysisSource>,
    aggregator: HistoryAggregator,
    limits: Arc<UsageLimitService>,
    history_limit: usize,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn AnalysisSource>,
        aggregator: HistoryAggregator,
        limits: Arc<UsageLimitService>,
        history_limit: usize,
    ) -> Self {
        Self {
            source,
            aggregator,
            limits,
            history_limit,
        }
    }

    /// Fetch the recent history and the user's profile, then build the dashboard
    pub async fn load_dashboard(&self) -> Result<DashboardSnapshot, DashboardError> {
        let (history, profile) = futures::try_join!(
            self.source.fetch_history(self.history_limit),
            self.source.fetch_current_user(),
        )?;

        let stats = self.aggregator.aggregate_now(&history);
        let usage = self.limits.usage_overview(&profile)?;

        tracing::info!(
            "Dashboard loaded: {} analyses ({} this week, {} this month)",
            stats.total_analyses,
            stats.weekly_analyses,
            stats.monthly_analyses
        );

        Ok(DashboardSnapshot {
            top_topics: stats.top_topics(TOP_ENTRIES),
            top_emotions: stats.top_emotions(TOP_ENTRIES),
            stats,
            usage,
        })
    }

    /// Get usage against quotas without loading history
    pub async fn get_usage_overview(&self) -> Result<UsageOverview, DashboardError> {
        let profile = self.source.fetch_current_user().await?;
        Ok(self.limits.usage_overview(&profile)?)
    }
}
