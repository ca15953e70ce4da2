//! Usage limit evaluation against subscription quotas

use thiserror::Error;

use crate::types::{
    SubscriptionTier, UsageEvaluation, UsageLimits, UsageMetric, UsageOverview, UserProfile,
};

/// Utilization above this ratio raises the "approaching limit" warning
pub const APPROACHING_LIMIT_RATIO: f64 = 0.8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageLimitError {
    #[error("No {metric} quota configured for the {tier} tier")]
    ZeroQuota {
        tier: SubscriptionTier,
        metric: UsageMetric,
    },
}

/// Evaluate usage against the default quota table
///
/// Unknown tiers fall back to the free quotas.
pub fn evaluate(
    tier: &str,
    metric: UsageMetric,
    current_usage: u64,
) -> Result<UsageEvaluation, UsageLimitError> {
    UsageLimitService::default().evaluate(SubscriptionTier::from_str(tier), metric, current_usage)
}

#[derive(Debug)]
pub struct UsageLimitService {
    limits: UsageLimits,
}

impl UsageLimitService {
    /// Create a service over a custom quota table, rejecting zero quotas up front
    pub fn new(limits: UsageLimits) -> Result<Self, UsageLimitError> {
        validate_limits(&limits)?;
        Ok(Self { limits })
    }

    /// Get usage limits
    pub fn get_usage_limits(&self) -> UsageLimits {
        self.limits
    }

    /// Compare one metric's usage against the tier's quota
    pub fn evaluate(
        &self,
        tier: SubscriptionTier,
        metric: UsageMetric,
        current_usage: u64,
    ) -> Result<UsageEvaluation, UsageLimitError> {
        let limit = self.limits.for_tier(tier).get(metric);
        if limit == 0 {
            return Err(UsageLimitError::ZeroQuota { tier, metric });
        }

        let ratio = current_usage as f64 / limit as f64;
        let percentage = (ratio * 100.0).round().min(100.0) as u8;

        Ok(UsageEvaluation {
            metric,
            current: current_usage,
            limit,
            ratio,
            percentage,
            approaching_limit: ratio > APPROACHING_LIMIT_RATIO,
        })
    }

    /// Evaluate every metric for a signed-in user
    pub fn usage_overview(&self, profile: &UserProfile) -> Result<UsageOverview, UsageLimitError> {
        let tier = profile.tier();
        let counters = profile.usage_stats;
        let eval = |metric: UsageMetric| self.evaluate(tier, metric, counters.get(metric));

        let overview = UsageOverview {
            tier,
            analyses: eval(UsageMetric::Analyses)?,
            files: eval(UsageMetric::Files)?,
            urls: eval(UsageMetric::Urls)?,
        };

        if overview.any_approaching_limit() {
            tracing::info!("User on {} tier is approaching a usage limit", tier);
        }

        Ok(overview)
    }
}

impl Default for UsageLimitService {
    fn default() -> Self {
        Self {
            limits: UsageLimits::default(),
        }
    }
}

fn validate_limits(limits: &UsageLimits) -> Result<(), UsageLimitError> {
    for tier in [SubscriptionTier::Free, SubscriptionTier::Pro] {
        let quota = limits.for_tier(tier);
        if let Some(metric) = UsageMetric::ALL.into_iter().find(|m| quota.get(*m) == 0) {
            return Err(UsageLimitError::ZeroQuota { tier, metric });
        }
    }
    Ok(())
}
