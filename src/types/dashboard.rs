//! Dashboard statistics type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::{Emotion, Sentiment, Topic};
use super::usage::UsageOverview;

/// Summary of an analysis history, recomputed on every dashboard load
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_analyses: u64,
    pub weekly_analyses: u64,
    pub monthly_analyses: u64,
    pub sentiment_counts: BTreeMap<Sentiment, u64>,
    pub emotion_counts: BTreeMap<Emotion, u64>,
    pub topic_counts: BTreeMap<Topic, u64>,
    /// Local calendar date (`YYYY-MM-DD`) -> analyses in the weekly window
    pub daily_usage: BTreeMap<String, u64>,
    pub average_confidence: f64,
}

/// A label paired with how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCount<K> {
    pub label: K,
    /// Label as shown on the dashboard
    pub display_name: String,
    pub count: u64,
}

impl DashboardStats {
    /// Most frequent topics, highest count first
    pub fn top_topics(&self, n: usize) -> Vec<RankedCount<Topic>> {
        rank(&self.topic_counts, n, Topic::display_name)
    }

    /// Most frequent emotions, highest count first
    pub fn top_emotions(&self, n: usize) -> Vec<RankedCount<Emotion>> {
        rank(&self.emotion_counts, n, Emotion::display_name)
    }

    /// Share of all analyses with the given sentiment, as a percentage
    pub fn sentiment_share(&self, sentiment: Sentiment) -> f64 {
        if self.total_analyses == 0 {
            return 0.0;
        }
        let count = self.sentiment_counts.get(&sentiment).copied().unwrap_or(0);
        count as f64 / self.total_analyses as f64 * 100.0
    }
}

// Ties keep key order, since the sort is stable over an ordered map.
fn rank<K, F>(counts: &BTreeMap<K, u64>, n: usize, display_name: F) -> Vec<RankedCount<K>>
where
    K: Copy + Ord,
    F: Fn(&K) -> String,
{
    let mut ranked: Vec<RankedCount<K>> = counts
        .iter()
        .map(|(label, count)| RankedCount {
            label: *label,
            display_name: display_name(label),
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Positive / negative / neutral tally over a batch of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBreakdown {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentBreakdown {
    pub fn from_sentiments<I>(sentiments: I) -> Self
    where
        I: IntoIterator<Item = Sentiment>,
    {
        sentiments
            .into_iter()
            .fold(Self::default(), |mut acc, sentiment| {
                match sentiment {
                    Sentiment::Positive => acc.positive += 1,
                    Sentiment::Negative => acc.negative += 1,
                    Sentiment::Neutral => acc.neutral += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }
}

/// Everything the dashboard view renders after a load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub usage: UsageOverview,
    pub top_topics: Vec<RankedCount<Topic>>,
    pub top_emotions: Vec<RankedCount<Emotion>>,
}
