//! History aggregation for the analytics dashboard
//!
//! Turns a feed of past analyses into [`DashboardStats`]. The free functions
//! are pure: they never read the clock, never mutate their input, and give the
//! same result for any ordering of the records.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone, Utc};

use crate::types::{AnalysisRecord, DashboardStats};

/// Length of the weekly window in days (exactly 168 hours)
pub const WEEKLY_WINDOW_DAYS: i64 = 7;
/// Length of the monthly window in days (exactly 720 hours)
pub const MONTHLY_WINDOW_DAYS: i64 = 30;
/// An emotion counts towards a record only when its confidence is strictly above this
pub const EMOTION_THRESHOLD: f64 = 0.5;

/// Aggregate `records` relative to `now`, bucketing days in the host's local time zone
pub fn aggregate(records: &[AnalysisRecord], now: DateTime<Utc>) -> DashboardStats {
    aggregate_in(records, now, &Local)
}

/// Aggregate `records` relative to `now`, bucketing days in `tz`
pub fn aggregate_in<Tz: TimeZone>(
    records: &[AnalysisRecord],
    now: DateTime<Utc>,
    tz: &Tz,
) -> DashboardStats {
    let week_start = now - Duration::days(WEEKLY_WINDOW_DAYS);
    let month_start = now - Duration::days(MONTHLY_WINDOW_DAYS);

    let mut stats = DashboardStats {
        total_analyses: records.len() as u64,
        ..Default::default()
    };
    let mut confidences: Vec<f64> = Vec::with_capacity(records.len());

    for record in records {
        confidences.push(record.confidence);

        *stats.sentiment_counts.entry(record.sentiment).or_insert(0) += 1;

        if let Some(emotions) = &record.emotions {
            for (emotion, confidence) in emotions {
                if *confidence > EMOTION_THRESHOLD {
                    *stats.emotion_counts.entry(*emotion).or_insert(0) += 1;
                }
            }
        }

        if let Some(topic) = record.primary_topic {
            *stats.topic_counts.entry(topic).or_insert(0) += 1;
        }

        if record.timestamp >= month_start {
            stats.monthly_analyses += 1;
        }

        if record.timestamp >= week_start {
            stats.weekly_analyses += 1;
            let day = record
                .timestamp
                .with_timezone(tz)
                .date_naive()
                .format("%Y-%m-%d")
                .to_string();
            *stats.daily_usage.entry(day).or_insert(0) += 1;
        }
    }

    stats.average_confidence = average_confidence(confidences);
    stats
}

/// Mean confidence rounded to two decimals, `0.0` for an empty history
fn average_confidence(mut confidences: Vec<f64>) -> f64 {
    if confidences.is_empty() {
        return 0.0;
    }
    // Summing in sorted order keeps the result independent of record order.
    confidences.sort_by(f64::total_cmp);
    let sum: f64 = confidences.iter().sum();
    round2(sum / confidences.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Source of "now" for aggregations
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Aggregator bound to a clock and a day boundary
#[derive(Clone)]
pub struct HistoryAggregator {
    clock: Arc<dyn Clock>,
    /// `None` buckets days in the host's local zone
    offset: Option<FixedOffset>,
}

impl HistoryAggregator {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            offset: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Aggregate against the aggregator's clock
    pub fn aggregate_now(&self, records: &[AnalysisRecord]) -> DashboardStats {
        self.aggregate_at(records, self.clock.now())
    }

    pub fn aggregate_at(&self, records: &[AnalysisRecord], now: DateTime<Utc>) -> DashboardStats {
        match &self.offset {
            Some(offset) => aggregate_in(records, now, offset),
            None => aggregate(records, now),
        }
    }
}

impl Default for HistoryAggregator {
    fn default() -> Self {
        Self::new()
    }
}
