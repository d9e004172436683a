//! Domain types for the claimlens client.
//!
//! Everything here is a value object normalized once at the API boundary;
//! downstream code never sees raw backend vocabularies, percentage
//! confidences, or mixed-unit timestamps.

pub mod credibility;
pub mod evidence;
pub mod news;
pub mod verdict;

// Re-export commonly used types
pub use credibility::{classify_domain, domain_of, stance_from_snippet, CredibilityTier};
pub use evidence::{
    EvidenceQuality, EvidenceStats, RawVerification, SourceEvidence, Stance, VerificationResult,
};
pub use news::{
    ArticleDetail, ContextArticle, HomepageNews, NewsArticle, NewsDetail, RawArticleDetail,
    RawHomepageNews, RawNewsArticle, RawNewsDetail, SourceInfo,
};
pub use verdict::{parse_wire_timestamp, Confidence, VerificationStatus, Verdict};
