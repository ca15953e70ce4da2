//! Analysis record type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sentiment polarity enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is outside its fixed taxonomy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {label}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

/// Emotion label enum (fixed 8-label set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Trust,
    Disgust,
    Surprise,
    Anticipation,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Trust,
        Emotion::Disgust,
        Emotion::Surprise,
        Emotion::Anticipation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Trust => "trust",
            Emotion::Disgust => "disgust",
            Emotion::Surprise => "surprise",
            Emotion::Anticipation => "anticipation",
        }
    }

    /// Capitalized label, e.g. "Anticipation"
    pub fn display_name(&self) -> String {
        capitalize(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == needle)
            .ok_or_else(|| UnknownLabel {
                kind: "emotion",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic label enum (fixed 12-topic taxonomy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    CustomerService,
    ProductQuality,
    Pricing,
    DeliveryShipping,
    UserExperience,
    TechnicalIssues,
    MarketingAdvertising,
    CompanyPolicies,
    CompetitorComparison,
    FeatureRequests,
    SecurityPrivacy,
    PerformanceSpeed,
}

impl Topic {
    pub const ALL: [Topic; 12] = [
        Topic::CustomerService,
        Topic::ProductQuality,
        Topic::Pricing,
        Topic::DeliveryShipping,
        Topic::UserExperience,
        Topic::TechnicalIssues,
        Topic::MarketingAdvertising,
        Topic::CompanyPolicies,
        Topic::CompetitorComparison,
        Topic::FeatureRequests,
        Topic::SecurityPrivacy,
        Topic::PerformanceSpeed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::CustomerService => "customer_service",
            Topic::ProductQuality => "product_quality",
            Topic::Pricing => "pricing",
            Topic::DeliveryShipping => "delivery_shipping",
            Topic::UserExperience => "user_experience",
            Topic::TechnicalIssues => "technical_issues",
            Topic::MarketingAdvertising => "marketing_advertising",
            Topic::CompanyPolicies => "company_policies",
            Topic::CompetitorComparison => "competitor_comparison",
            Topic::FeatureRequests => "feature_requests",
            Topic::SecurityPrivacy => "security_privacy",
            Topic::PerformanceSpeed => "performance_speed",
        }
    }

    /// Human-readable label, e.g. "customer service"
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl FromStr for Topic {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| UnknownLabel {
                kind: "topic",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One historical sentiment analysis, as returned by the history feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_emotions",
        skip_serializing_if = "Option::is_none"
    )]
    pub emotions: Option<BTreeMap<Emotion, f64>>,
    #[serde(
        default,
        deserialize_with = "deserialize_topic",
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_topic: Option<Topic>,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accepts RFC 3339 timestamps, or naive ISO-8601 datetimes which are read as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp {:?}: {}", raw, e))
}

fn deserialize_emotions<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<Emotion, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    // Scores come from model output, so a label may carry null or a string
    let emotions: BTreeMap<Emotion, f64> = raw
        .into_iter()
        .filter_map(|(label, score)| {
            let emotion = match label.parse::<Emotion>() {
                Ok(emotion) => emotion,
                Err(e) => {
                    tracing::debug!("Dropping emotion score: {}", e);
                    return None;
                }
            };
            match score.as_f64() {
                Some(confidence) => Some((emotion, confidence)),
                None => {
                    tracing::debug!("Dropping non-numeric {} score: {}", emotion, score);
                    None
                }
            }
        })
        .collect();

    Ok(if emotions.is_empty() { None } else { Some(emotions) })
}

fn deserialize_topic<'de, D>(deserializer: D) -> Result<Option<Topic>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| match s.parse::<Topic>() {
            Ok(topic) => Some(topic),
            Err(e) => {
                tracing::debug!("Dropping primary topic: {}", e);
                None
            }
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_deserialize_full() {
        let json = r#"{
            "id": "a1",
            "timestamp": "2026-10-18T09:30:00+00:00",
            "text": "Great support team",
            "sentiment": "positive",
            "confidence": 0.92,
            "emotions": {"joy": 0.8, "trust": 0.6},
            "primary_topic": "customer_service"
        }"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sentiment, Sentiment::Positive);
        assert_eq!(record.primary_topic, Some(Topic::CustomerService));
        assert_eq!(record.emotions.as_ref().unwrap()[&Emotion::Joy], 0.8);
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_record_deserialize_naive_timestamp_is_utc() {
        let json = r#"{
            "id": "a2",
            "timestamp": "2026-10-18T09:30:00.123000",
            "text": "meh",
            "sentiment": "neutral",
            "confidence": 0.5
        }"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp.timestamp(), 1_792_315_800);
        assert!(record.emotions.is_none());
        assert!(record.primary_topic.is_none());
    }

    #[test]
    fn test_record_deserialize_degrades_optional_fields() {
        let json = r#"{
            "id": "a3",
            "timestamp": "2026-10-18T09:30:00Z",
            "text": "ok",
            "sentiment": "negative",
            "confidence": 0.7,
            "emotions": {"anger": 0.9, "boredom": 0.8},
            "primary_topic": "",
            "sarcasm_detected": true,
            "aspects_analysis": [{"aspect": "price"}]
        }"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        let emotions = record.emotions.unwrap();
        assert_eq!(emotions.len(), 1);
        assert!(emotions.contains_key(&Emotion::Anger));
        assert!(record.primary_topic.is_none());
    }

    #[test]
    fn test_non_numeric_emotion_scores_are_dropped() {
        let json = r#"[
            {"id": "a6", "timestamp": "2026-10-18T09:30:00Z", "sentiment": "positive",
             "confidence": 0.9, "emotions": {"joy": 0.8, "fear": null, "trust": "high"}},
            {"id": "a7", "timestamp": "2026-10-18T10:00:00Z", "sentiment": "neutral",
             "confidence": 0.5, "emotions": {"fear": null}}
        ]"#;
        let records: Vec<AnalysisRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);

        let emotions = records[0].emotions.as_ref().unwrap();
        assert_eq!(emotions.len(), 1);
        assert_eq!(emotions[&Emotion::Joy], 0.8);
        assert!(records[1].emotions.is_none());
    }

    #[test]
    fn test_record_deserialize_empty_and_null_emotions() {
        for emotions in ["{}", "null"] {
            let json = format!(
                r#"{{"id": "a4", "timestamp": "2026-10-18T09:30:00Z", "sentiment": "neutral",
                    "confidence": 0.4, "emotions": {}, "primary_topic": null}}"#,
                emotions
            );
            let record: AnalysisRecord = serde_json::from_str(&json).unwrap();
            assert!(record.emotions.is_none());
            assert!(record.primary_topic.is_none());
        }
    }

    #[test]
    fn test_unknown_topic_is_dropped() {
        let json = r#"{"id": "a5", "timestamp": "2026-10-18T09:30:00Z", "sentiment": "neutral",
                       "confidence": 0.4, "primary_topic": "astrology"}"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert!(record.primary_topic.is_none());
    }

    #[test]
    fn test_invalid_sentiment_is_rejected() {
        let json = r#"{"id": "a6", "timestamp": "2026-10-18T09:30:00Z", "sentiment": "ecstatic",
                       "confidence": 0.4}"#;
        assert!(serde_json::from_str::<AnalysisRecord>(json).is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Emotion::Anticipation.display_name(), "Anticipation");
        assert_eq!(Topic::CustomerService.display_name(), "customer service");
        assert_eq!(Topic::Pricing.display_name(), "pricing");
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("JOY".parse::<Emotion>(), Ok(Emotion::Joy));
        assert_eq!("security_privacy".parse::<Topic>(), Ok(Topic::SecurityPrivacy));
        let err = "boredom".parse::<Emotion>().unwrap_err();
        assert_eq!(err.to_string(), "unknown emotion label: boredom");
    }
}
