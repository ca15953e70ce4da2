//! Subscription tier and usage limit type definitions

use serde::{Deserialize, Serialize};

/// Subscription tier enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
        }
    }

    /// Unknown tiers are treated as free
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pro" => SubscriptionTier::Pro,
            _ => SubscriptionTier::Free,
        }
    }
}

/// Metered resource enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMetric {
    Analyses,
    Files,
    Urls,
}

impl UsageMetric {
    pub const ALL: [UsageMetric; 3] = [UsageMetric::Analyses, UsageMetric::Files, UsageMetric::Urls];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageMetric::Analyses => "analyses",
            UsageMetric::Files => "files",
            UsageMetric::Urls => "urls",
        }
    }
}

impl std::fmt::Display for UsageMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quotas for a single tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierQuota {
    pub analyses: u64,
    pub files: u64,
    pub urls: u64,
}

impl TierQuota {
    pub fn get(&self, metric: UsageMetric) -> u64 {
        match metric {
            UsageMetric::Analyses => self.analyses,
            UsageMetric::Files => self.files,
            UsageMetric::Urls => self.urls,
        }
    }
}

/// Usage limits configuration, keyed by tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimits {
    pub free: TierQuota,
    pub pro: TierQuota,
}

impl UsageLimits {
    pub fn for_tier(&self, tier: SubscriptionTier) -> TierQuota {
        match tier {
            SubscriptionTier::Free => self.free,
            SubscriptionTier::Pro => self.pro,
        }
    }
}

impl Default for UsageLimits {
    fn default() -> Self {
        UsageLimits {
            free: TierQuota {
                analyses: 50,
                files: 5,
                urls: 10,
            },
            pro: TierQuota {
                analyses: 10_000,
                files: 1_000,
                urls: 5_000,
            },
        }
    }
}

/// Result of comparing observed usage against a quota
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvaluation {
    pub metric: UsageMetric,
    pub current: u64,
    pub limit: u64,
    /// Unclamped `current / limit`
    pub ratio: f64,
    /// `ratio` as a whole percentage, clamped to 100 for display
    pub percentage: u8,
    pub approaching_limit: bool,
}

/// Usage counters reported for the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageCounters {
    #[serde(default)]
    pub analyses_this_month: u64,
    #[serde(default)]
    pub files_uploaded: u64,
    #[serde(default)]
    pub urls_analyzed: u64,
}

impl UsageCounters {
    pub fn get(&self, metric: UsageMetric) -> u64 {
        match metric {
            UsageMetric::Analyses => self.analyses_this_month,
            UsageMetric::Files => self.files_uploaded,
            UsageMetric::Urls => self.urls_analyzed,
        }
    }
}

/// The signed-in user's profile, as returned by the session endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_tier")]
    pub subscription_tier: String,
    #[serde(default)]
    pub usage_stats: UsageCounters,
}

fn default_tier() -> String {
    SubscriptionTier::Free.as_str().to_string()
}

impl UserProfile {
    pub fn tier(&self) -> SubscriptionTier {
        SubscriptionTier::from_str(&self.subscription_tier)
    }
}

/// Per-metric usage evaluations for one user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageOverview {
    pub tier: SubscriptionTier,
    pub analyses: UsageEvaluation,
    pub files: UsageEvaluation,
    pub urls: UsageEvaluation,
}

impl UsageOverview {
    pub fn any_approaching_limit(&self) -> bool {
        [self.analyses, self.files, self.urls]
            .iter()
            .any(|e| e.approaching_limit)
    }
}
