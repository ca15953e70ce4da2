//! Pulse Point - analytics core
//!
//! This library turns a user's sentiment-analysis history into dashboard
//! statistics and evaluates usage against subscription quotas.

pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use std::sync::Arc;

use serde::Serialize;

use config::ClientConfig;
use error::ResultExt;
use services::{AnalysisApiService, DashboardService, HistoryAggregator, UsageLimitService};

/// Application state shared across all commands
pub struct AppState {
    /// Configuration the state was built from
    pub config: ClientConfig,
    /// Dashboard service for history-backed statistics
    pub dashboard_service: Arc<DashboardService>,
    /// Usage limit service for quota evaluation
    pub usage_limit_service: Arc<UsageLimitService>,
}

impl AppState {
    /// Wire the services against the real analysis backend
    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        let source = Arc::new(
            AnalysisApiService::new(&config)
                .with_context(|| format!("Failed to build client for {}", config.api_url))?,
        );
        let usage_limit_service = Arc::new(UsageLimitService::default());
        let dashboard_service = Arc::new(DashboardService::new(
            source,
            HistoryAggregator::new(),
            usage_limit_service.clone(),
            config.history_limit,
        ));

        Ok(Self {
            config,
            dashboard_service,
            usage_limit_service,
        })
    }
}

/// Render a command result as pretty-printed JSON
pub fn to_pretty_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use types::*;
