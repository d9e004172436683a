//! Backend API boundary.
//!
//! One method per backend route, all fronted by the [`FactCheckApi`] trait
//! so views and tests can substitute a stub for the HTTP client.
//! Responses are normalized into domain types before they leave this
//! module; nothing downstream touches raw wire JSON.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ArticleDetail, HomepageNews, NewsArticle, NewsDetail, VerificationResult};

pub use client::{ApiConfig, HttpApiClient};

/// Failures at the API boundary.
///
/// Each call fails at most once: no retries, no caching. Retry is always
/// an explicit user action.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx HTTP response.
    #[error("HTTP {status} from backend")]
    Http { status: u16 },

    /// 2xx response whose envelope signals failure.
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Transport-level failure (unreachable host, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match any known shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Request could not be constructed (missing id/url, bad base URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    /// Single human-readable line for the view layer.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status } => {
                format!("The fact-check service returned HTTP {status}. Try again in a moment.")
            }
            ApiError::Backend { message } => message.clone(),
            ApiError::Network(_) => {
                "Failed to connect to the fact-check service. Is the backend running?".to_string()
            }
            ApiError::Decode(_) => {
                "The fact-check service sent an unreadable response.".to_string()
            }
            ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}

/// Operations the backend exposes.
#[async_trait]
pub trait FactCheckApi: Send + Sync {
    /// Verify a textual claim. Emptiness is the caller's concern.
    async fn verify_claim(
        &self,
        claim: &str,
        lang: Option<&str>,
    ) -> Result<VerificationResult, ApiError>;

    /// Fetch a bounded page of the latest analyzed news.
    async fn latest_news(
        &self,
        limit: usize,
        cache_bust: bool,
    ) -> Result<Vec<NewsArticle>, ApiError>;

    /// Fetch one news item with its stored analysis.
    async fn news_detail(&self, id: &str) -> Result<NewsDetail, ApiError>;

    /// Analyze one article URL on demand.
    async fn article_details(
        &self,
        id: &str,
        url: &str,
        title: Option<&str>,
    ) -> Result<ArticleDetail, ApiError>;

    /// Fetch the homepage buckets (recent / verified true / verified false).
    async fn homepage_news(&self) -> Result<HomepageNews, ApiError>;

    /// Liveness payload, passed through untouched.
    async fn health(&self) -> Result<serde_json::Value, ApiError>;
}
