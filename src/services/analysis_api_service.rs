//! Analysis API service for fetching history and session data from the backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::types::{AnalysisRecord, UserProfile};

const HISTORY_PATH: &str = "sentiment-history";
const CURRENT_USER_PATH: &str = "auth/me";

#[derive(Error, Debug)]
pub enum AnalysisApiError {
    #[error("Not authenticated: {0}")]
    Unauthorized(String),
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Read-only access to the data the dashboard is built from
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Most recent analyses, newest first, at most `limit`
    async fn fetch_history(&self, limit: usize) -> Result<Vec<AnalysisRecord>, AnalysisApiError>;

    /// The signed-in user's tier and usage counters
    async fn fetch_current_user(&self) -> Result<UserProfile, AnalysisApiError>;
}

pub struct AnalysisApiService {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl AnalysisApiService {
    pub fn new(config: &ClientConfig) -> Result<Self, AnalysisApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pulse-point/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisApiError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_base: format!("{}/api", config.api_url.trim_end_matches('/')),
            token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AnalysisApiError> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalysisApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AnalysisApiError::Unauthorized(format!(
                "{} rejected the session token",
                url
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned {}", url, status);
            return Err(AnalysisApiError::RequestFailed(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AnalysisApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl AnalysisSource for AnalysisApiService {
    async fn fetch_history(&self, limit: usize) -> Result<Vec<AnalysisRecord>, AnalysisApiError> {
        let records: Vec<AnalysisRecord> = self
            .get_json(HISTORY_PATH, &[("limit", limit.to_string())])
            .await?;
        tracing::debug!("Fetched {} history records", records.len());
        Ok(records)
    }

    async fn fetch_current_user(&self) -> Result<UserProfile, AnalysisApiError> {
        self.get_json(CURRENT_USER_PATH, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> ClientConfig {
        ClientConfig {
            api_url: api_url.to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_endpoint_joins_api_prefix() {
        let service = AnalysisApiService::new(&config("https://pulse.example.com/")).unwrap();
        assert_eq!(
            service.endpoint(HISTORY_PATH),
            "https://pulse.example.com/api/sentiment-history"
        );
        assert_eq!(
            service.endpoint(CURRENT_USER_PATH),
            "https://pulse.example.com/api/auth/me"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_surfaces_request_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let service = AnalysisApiService::new(&ClientConfig {
            request_timeout_secs: 2,
            ..config("http://127.0.0.1:9")
        })
        .unwrap();

        let err = service.fetch_history(50).await.unwrap_err();
        assert!(matches!(err, AnalysisApiError::RequestFailed(_)));
    }
}
