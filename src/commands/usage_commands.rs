//! Usage-related commands

use crate::error::{AppError, ErrorResponse};
use crate::types::{SubscriptionTier, UsageEvaluation, UsageLimits, UsageMetric, UsageOverview};
use crate::AppState;

/// Get the signed-in user's usage against every quota
pub async fn get_usage(state: &AppState) -> Result<UsageOverview, ErrorResponse> {
    state
        .dashboard_service
        .get_usage_overview()
        .await
        .map_err(|e| AppError::from(e).into())
}

/// Get usage limits
pub fn get_usage_limits(state: &AppState) -> UsageLimits {
    state.usage_limit_service.get_usage_limits()
}

/// Evaluate a single metric; a missing tier is treated as free
pub fn evaluate_usage(
    tier: Option<String>,
    metric: UsageMetric,
    current_usage: u64,
    state: &AppState,
) -> Result<UsageEvaluation, ErrorResponse> {
    let tier = tier
        .map(|t| SubscriptionTier::from_str(&t))
        .unwrap_or_default();

    state
        .usage_limit_service
        .evaluate(tier, metric, current_usage)
        .map_err(|e| AppError::from(e).into())
}
