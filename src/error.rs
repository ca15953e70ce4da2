//! Error types and result aliases for Pulse Point

use serde::Serialize;
use thiserror::Error;

use crate::services::{AnalysisApiError, DashboardError, UsageLimitError};

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Analysis API error: {0}")]
    AnalysisApi(#[from] AnalysisApiError),

    #[error("Usage limit error: {0}")]
    UsageLimit(#[from] UsageLimitError),

    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

/// Error response structure for the presentation layer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        let (code, message) = match &err {
            AppError::Config(e) => ("CONFIG_ERROR", e.to_string()),
            AppError::AnalysisApi(AnalysisApiError::Unauthorized(msg))
            | AppError::Dashboard(DashboardError::Source(AnalysisApiError::Unauthorized(msg))) => {
                ("UNAUTHORIZED", msg.clone())
            }
            AppError::AnalysisApi(e) => ("ANALYSIS_API_ERROR", e.to_string()),
            AppError::UsageLimit(e) => ("USAGE_LIMIT_ERROR", e.to_string()),
            AppError::Dashboard(e) => ("DASHBOARD_ERROR", e.to_string()),
            AppError::Json(e) => ("JSON_ERROR", e.to_string()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        ErrorResponse {
            code: code.to_string(),
            message,
            details: details(&err),
        }
    }
}

// Machine-readable fields for errors the presentation layer can act on
fn details(err: &AppError) -> Option<serde_json::Value> {
    match err {
        AppError::UsageLimit(UsageLimitError::ZeroQuota { tier, metric })
        | AppError::Dashboard(DashboardError::Limits(UsageLimitError::ZeroQuota {
            tier,
            metric,
        })) => Some(serde_json::json!({ "tier": tier, "metric": metric })),
        _ => None,
    }
}

// Convenience trait for adding context to errors
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: Into<AppError>> ResultExt<T> for Result<T, E> {
    fn with_context<F, S>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            let base_err: AppError = e.into();
            AppError::Internal(format!("{}: {}", f().into(), base_err))
        })
    }
}
