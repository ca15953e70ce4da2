//! Dashboard commands

use crate::error::{AppError, ErrorResponse};
use crate::types::{DashboardSnapshot, Sentiment, SentimentBreakdown};
use crate::AppState;

/// Load the analytics dashboard
pub async fn get_dashboard(state: &AppState) -> Result<DashboardSnapshot, ErrorResponse> {
    state
        .dashboard_service
        .load_dashboard()
        .await
        .map_err(|e| AppError::from(e).into())
}

/// Summarize the sentiments of a batch of results
pub fn summarize_batch(sentiments: Vec<Sentiment>) -> SentimentBreakdown {
    SentimentBreakdown::from_sentiments(sentiments)
}
