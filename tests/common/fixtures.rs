//! Test fixtures and data builders
//!
//! Builders for analysis records and user profiles.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use uuid::Uuid;

use pulse_point_lib::types::{
    AnalysisRecord, Emotion, Sentiment, Topic, UsageCounters, UserProfile,
};

use super::reference_now;

/// Create a neutral record analyzed at the reference instant
pub fn create_record() -> AnalysisRecord {
    AnalysisRecord {
        id: Uuid::new_v4().to_string(),
        timestamp: reference_now(),
        text: Sentence(3..8).fake(),
        sentiment: Sentiment::Neutral,
        confidence: 0.5,
        emotions: None,
        primary_topic: None,
    }
}

/// Builder for creating records with various configurations
pub struct RecordBuilder {
    record: AnalysisRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            record: create_record(),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.record.id = id.to_string();
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.record.timestamp = timestamp;
        self
    }

    /// Place the record `age` before the reference instant
    pub fn aged(self, age: Duration) -> Self {
        self.at(reference_now() - age)
    }

    pub fn sentiment(mut self, sentiment: Sentiment) -> Self {
        self.record.sentiment = sentiment;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.record.confidence = confidence;
        self
    }

    pub fn emotion(mut self, emotion: Emotion, confidence: f64) -> Self {
        self.record
            .emotions
            .get_or_insert_with(Default::default)
            .insert(emotion, confidence);
        self
    }

    pub fn topic(mut self, topic: Topic) -> Self {
        self.record.primary_topic = Some(topic);
        self
    }

    pub fn build(self) -> AnalysisRecord {
        self.record
    }
}

/// A mixed history spanning six weeks
pub fn sample_history() -> Vec<AnalysisRecord> {
    vec![
        RecordBuilder::new()
            .id("r1")
            .aged(Duration::hours(2))
            .sentiment(Sentiment::Positive)
            .confidence(0.9)
            .emotion(Emotion::Joy, 0.85)
            .emotion(Emotion::Trust, 0.55)
            .topic(Topic::CustomerService)
            .build(),
        RecordBuilder::new()
            .id("r2")
            .aged(Duration::days(1))
            .sentiment(Sentiment::Negative)
            .confidence(0.8)
            .emotion(Emotion::Anger, 0.7)
            .emotion(Emotion::Joy, 0.1)
            .topic(Topic::Pricing)
            .build(),
        RecordBuilder::new()
            .id("r3")
            .aged(Duration::days(3))
            .sentiment(Sentiment::Positive)
            .confidence(0.75)
            .topic(Topic::CustomerService)
            .build(),
        RecordBuilder::new()
            .id("r4")
            .aged(Duration::days(12))
            .sentiment(Sentiment::Neutral)
            .confidence(0.6)
            .emotion(Emotion::Surprise, 0.51)
            .build(),
        RecordBuilder::new()
            .id("r5")
            .aged(Duration::days(45))
            .sentiment(Sentiment::Negative)
            .confidence(0.95)
            .emotion(Emotion::Anger, 0.9)
            .topic(Topic::TechnicalIssues)
            .build(),
    ]
}

/// Create a user profile with the given tier and usage counters
pub fn create_profile(tier: &str, analyses: u64, files: u64, urls: u64) -> UserProfile {
    UserProfile {
        id: Some(format!("user_{}", Uuid::new_v4())),
        email: Some("analyst@example.com".to_string()),
        full_name: Some("Test Analyst".to_string()),
        subscription_tier: tier.to_string(),
        usage_stats: UsageCounters {
            analyses_this_month: analyses,
            files_uploaded: files,
            urls_analyzed: urls,
        },
    }
}
