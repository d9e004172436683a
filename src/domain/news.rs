//! Pre-analyzed news articles and article-level analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evidence::{RawVerification, VerificationResult};
use super::verdict::{parse_wire_timestamp, Confidence, VerificationStatus, Verdict};

/// A news item from the listing feeds, read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub snippet: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub status: VerificationStatus,
    /// Trustworthiness of the article, in [0, 1].
    pub trust_score: Option<f64>,
    pub tags: Vec<String>,
    pub source_count: Option<u32>,
}

/// News item as the feeds send it. Field names drifted between backend
/// versions, hence the aliases.
#[derive(Debug, Deserialize)]
pub struct RawNewsArticle {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "content_preview")]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "published_date")]
    pub published_at: Option<serde_json::Value>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(default, alias = "trustScore")]
    pub trustworthiness_score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source_count: Option<u32>,
}

impl RawNewsArticle {
    pub fn normalize(self) -> NewsArticle {
        // Ids arrive as strings or numbers depending on the feed.
        let id = match self.id {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        NewsArticle {
            id,
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            snippet: self.snippet,
            source: self.source,
            url: self.url,
            published_at: self.published_at.as_ref().and_then(parse_wire_timestamp),
            status: self
                .verification_status
                .as_deref()
                .map(VerificationStatus::from_wire)
                .unwrap_or_default(),
            trust_score: self
                .trustworthiness_score
                .map(|s| Confidence::from_raw(s).as_fraction()),
            tags: self.tags,
            source_count: self.source_count,
        }
    }
}

/// Full text plus credibility analysis for one news item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDetail {
    pub title: String,
    pub full_text: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub analysis: VerificationResult,
}

#[derive(Debug, Deserialize)]
pub struct RawNewsDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<serde_json::Value>,
    #[serde(default)]
    pub analysis: Option<RawVerification>,
}

impl RawNewsDetail {
    pub fn normalize(self) -> NewsDetail {
        // A detail without analysis still renders, as "no analysis".
        let analysis = match self.analysis {
            Some(raw) => raw.normalize(),
            None => VerificationResult {
                verdict: Verdict::Unclear,
                confidence: Confidence::ZERO,
                explanation: Some("No analysis".to_string()),
                evidence: Vec::new(),
                stats: None,
                credibility_score: None,
                timestamp: Utc::now(),
            },
        };

        NewsDetail {
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            full_text: self.full_text,
            source: self.source,
            published_at: self.published_at.as_ref().and_then(parse_wire_timestamp),
            analysis,
        }
    }
}

/// Article related to the one being inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextArticle {
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub similarity: f64,
}

/// Where an article came from and why we trust it (or not).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub credibility_factors: Option<serde_json::Map<String, serde_json::Value>>,
}

/// On-demand analysis of a single article URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDetail {
    pub title: String,
    pub content_preview: Option<String>,
    pub url: Option<String>,
    pub verdict: Verdict,
    pub overall_score: Confidence,
    pub stance: Option<String>,
    pub stance_confidence: Confidence,
    pub source_credibility: f64,
    pub content_length: Option<u64>,
    pub context_articles: Vec<ContextArticle>,
    pub source_info: SourceInfo,
    pub analyzed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RawArticleDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content_preview: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub analysis: Option<RawArticleAnalysis>,
    #[serde(default)]
    pub context_articles: Vec<ContextArticle>,
    #[serde(default)]
    pub source_info: SourceInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawArticleAnalysis {
    #[serde(default)]
    pub overall_verdict: Option<String>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub stance: Option<String>,
    #[serde(default)]
    pub stance_confidence: Option<f64>,
    #[serde(default)]
    pub source_credibility: Option<f64>,
    #[serde(default)]
    pub content_length: Option<u64>,
    #[serde(default)]
    pub analysis_timestamp: Option<serde_json::Value>,
}

impl RawArticleDetail {
    pub fn normalize(self) -> ArticleDetail {
        let analysis = self.analysis.unwrap_or_default();

        // Article verdicts use their own wording (`reliable`/`questionable`/
        // `mixed`); fold it onto the shared enum.
        let verdict = match analysis
            .overall_verdict
            .as_deref()
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("reliable") => Verdict::True,
            Some("questionable") => Verdict::False,
            Some("mixed") => Verdict::Misleading,
            Some(other) => Verdict::from_wire(other),
            None => Verdict::Unclear,
        };

        ArticleDetail {
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            content_preview: self.content_preview,
            url: self.url,
            verdict,
            overall_score: Confidence::from_raw(analysis.overall_score.unwrap_or(0.0)),
            stance: analysis.stance,
            stance_confidence: Confidence::from_raw(analysis.stance_confidence.unwrap_or(0.0)),
            source_credibility: Confidence::from_raw(analysis.source_credibility.unwrap_or(0.0))
                .as_fraction(),
            content_length: analysis.content_length,
            context_articles: self.context_articles,
            source_info: self.source_info,
            analyzed_at: analysis
                .analysis_timestamp
                .as_ref()
                .and_then(parse_wire_timestamp),
        }
    }
}

/// Homepage buckets: most recent plus the two verified categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomepageNews {
    pub recent: Vec<NewsArticle>,
    pub verified_true: Vec<NewsArticle>,
    pub verified_false: Vec<NewsArticle>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHomepageNews {
    #[serde(default)]
    pub recent: Vec<RawNewsArticle>,
    #[serde(default)]
    pub verified_true: Vec<RawNewsArticle>,
    #[serde(default)]
    pub verified_false: Vec<RawNewsArticle>,
}

impl RawHomepageNews {
    pub fn normalize(self) -> HomepageNews {
        let normalize = |items: Vec<RawNewsArticle>| -> Vec<NewsArticle> {
            items.into_iter().map(RawNewsArticle::normalize).collect()
        };
        HomepageNews {
            recent: normalize(self.recent),
            verified_true: normalize(self.verified_true),
            verified_false: normalize(self.verified_false),
        }
    }
}
