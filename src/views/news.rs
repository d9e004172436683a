//! News listing lifecycle.
//!
//! Fetches one bounded page and filters it into tabs client-side; tab
//! switches never re-fetch. A failed fetch falls back to a built-in
//! sample set so the first render is never an empty error page; the
//! fallback is only ever used after a failure, never proactively.

use tracing::warn;

use super::Phase;
use crate::api::FactCheckApi;
use crate::domain::{NewsArticle, VerificationStatus};

/// Client-side verdict buckets over the fetched set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Latest,
    VerifiedTrue,
    VerifiedFalse,
}

pub struct NewsFeed {
    limit: usize,
    phase: Phase,
    articles: Vec<NewsArticle>,
    error: Option<String>,
    is_fallback: bool,
}

impl NewsFeed {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            phase: Phase::Idle,
            articles: Vec::new(),
            error: None,
            is_fallback: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The raw error from the last failed fetch, kept even when the
    /// fallback set rendered in its place.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the current set is the built-in sample data.
    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    pub fn articles(&self) -> &[NewsArticle] {
        &self.articles
    }

    /// Initial load.
    pub async fn load(&mut self, api: &dyn FactCheckApi) {
        self.fetch(api, false).await;
    }

    /// Manual refresh: re-issues the fetch with a cache-buster and
    /// replaces the whole set.
    pub async fn refresh(&mut self, api: &dyn FactCheckApi) {
        self.fetch(api, true).await;
    }

    async fn fetch(&mut self, api: &dyn FactCheckApi, cache_bust: bool) {
        if self.phase == Phase::Loading {
            return;
        }
        self.phase = Phase::Loading;
        self.error = None;

        match api.latest_news(self.limit, cache_bust).await {
            Ok(articles) => {
                self.articles = articles;
                self.is_fallback = false;
                self.phase = Phase::Success;
            }
            Err(e) => {
                warn!("news fetch failed, rendering sample data: {e}");
                self.error = Some(e.user_message());
                self.articles = fallback_articles();
                self.is_fallback = true;
                // The view still renders; the error is advisory.
                self.phase = Phase::Success;
            }
        }
    }

    /// Filter the already-fetched set into a tab. No re-fetch.
    pub fn tab(&self, tab: Tab) -> Vec<&NewsArticle> {
        self.articles
            .iter()
            .filter(|a| match tab {
                Tab::Latest => true,
                Tab::VerifiedTrue => a.status.is_verified_true(),
                Tab::VerifiedFalse => a.status == VerificationStatus::VerifiedFalse,
            })
            .collect()
    }
}

/// Fixed sample set rendered when the backend is unreachable.
pub fn fallback_articles() -> Vec<NewsArticle> {
    let sample = |id: &str,
                  title: &str,
                  snippet: &str,
                  source: &str,
                  status: VerificationStatus,
                  trust: f64| NewsArticle {
        id: id.to_string(),
        title: title.to_string(),
        snippet: Some(snippet.to_string()),
        source: Some(source.to_string()),
        url: None,
        published_at: None,
        status,
        trust_score: Some(trust),
        tags: vec!["sample".to_string()],
        source_count: None,
    };

    vec![
        sample(
            "sample-1",
            "National vaccination drive reaches 80% coverage",
            "Health ministry figures confirm the campaign met its mid-year target across all provinces.",
            "Kathmandu Post",
            VerificationStatus::VerifiedTrue,
            0.9,
        ),
        sample(
            "sample-2",
            "Viral post claims new tax on mobile money transfers",
            "The circulating screenshot cites no official source; the finance ministry denies any such plan.",
            "Onlinekhabar",
            VerificationStatus::VerifiedFalse,
            0.2,
        ),
        sample(
            "sample-3",
            "Monsoon forecast revised upward for eastern region",
            "Meteorologists project above-average rainfall; flood preparations are underway.",
            "Nepali Times",
            VerificationStatus::LikelyTrue,
            0.7,
        ),
        sample(
            "sample-4",
            "Claims of miracle cure circulate on social media",
            "No peer-reviewed study supports the treatment; experts urge caution.",
            "Reuters",
            VerificationStatus::Questionable,
            0.4,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubApi {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubApi {
        fn with_articles(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    fn article(id: &str, status: VerificationStatus) -> NewsArticle {
        NewsArticle {
            id: id.to_string(),
            title: format!("article {id}"),
            snippet: None,
            source: None,
            url: None,
            published_at: None,
            status,
            trust_score: None,
            tags: Vec::new(),
            source_count: None,
        }
    }

    #[async_trait]
    impl FactCheckApi for StubApi {
        async fn verify_claim(
            &self,
            _claim: &str,
            _lang: Option<&str>,
        ) -> Result<crate::domain::VerificationResult, ApiError> {
            unimplemented!("not used by news tests")
        }

        async fn latest_news(
            &self,
            _limit: usize,
            _cache_bust: bool,
        ) -> Result<Vec<NewsArticle>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::Network("unreachable".to_string()));
            }
            Ok(vec![
                article("1", VerificationStatus::VerifiedTrue),
                article("2", VerificationStatus::VerifiedFalse),
                article("3", VerificationStatus::LikelyTrue),
                article("4", VerificationStatus::Unverified),
            ])
        }

        async fn news_detail(&self, _id: &str) -> Result<crate::domain::NewsDetail, ApiError> {
            unimplemented!("not used by news tests")
        }

        async fn article_details(
            &self,
            _id: &str,
            _url: &str,
            _title: Option<&str>,
        ) -> Result<crate::domain::ArticleDetail, ApiError> {
            unimplemented!("not used by news tests")
        }

        async fn homepage_news(&self) -> Result<crate::domain::HomepageNews, ApiError> {
            unimplemented!("not used by news tests")
        }

        async fn health(&self) -> Result<serde_json::Value, ApiError> {
            unimplemented!("not used by news tests")
        }
    }

    #[tokio::test]
    async fn test_tabs_filter_without_refetch() {
        let api = StubApi::with_articles(false);
        let mut feed = NewsFeed::new(10);
        feed.load(&api).await;

        assert_eq!(feed.phase(), Phase::Success);
        assert_eq!(feed.tab(Tab::Latest).len(), 4);

        // VerifiedTrue bucket includes likely_true.
        let verified: Vec<&str> = feed
            .tab(Tab::VerifiedTrue)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(verified, vec!["1", "3"]);

        let debunked: Vec<&str> = feed
            .tab(Tab::VerifiedFalse)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(debunked, vec!["2"]);

        // Three tab reads, still one fetch.
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_fallback() {
        let api = StubApi::with_articles(true);
        let mut feed = NewsFeed::new(10);
        feed.load(&api).await;

        // Never an empty first render.
        assert_eq!(feed.phase(), Phase::Success);
        assert!(feed.is_fallback());
        assert!(!feed.articles().is_empty());
        assert!(feed.error().is_some());
    }

    #[tokio::test]
    async fn test_refresh_replaces_set() {
        let api = StubApi::with_articles(false);
        let mut feed = NewsFeed::new(10);
        feed.load(&api).await;
        feed.refresh(&api).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        assert!(!feed.is_fallback());
        assert_eq!(feed.articles().len(), 4);
    }

    #[test]
    fn test_fallback_set_is_never_empty() {
        assert!(!fallback_articles().is_empty());
    }
}
