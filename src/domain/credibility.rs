//! Local fallbacks for source credibility and stance.
//!
//! The backend usually scores these itself; when a payload arrives without
//! them we fall back to a domain tier list and a keyword scan so source
//! cards never render blank.

use super::evidence::Stance;

/// Credibility tier for a source domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityTier {
    High,
    Medium,
    Unknown,
}

const HIGH_CREDIBILITY_DOMAINS: &[&str] = &[
    "bbc.com",
    "reuters.com",
    "cnn.com",
    "npr.org",
    "apnews.com",
    "kathmandupost.com",
];

const MEDIUM_CREDIBILITY_DOMAINS: &[&str] = &[
    "myrepublica.com",
    "nepalitimes.com",
    "onlinekhabar.com",
    "techcrunch.com",
];

impl CredibilityTier {
    pub fn label(&self) -> &'static str {
        match self {
            CredibilityTier::High => "High Credibility",
            CredibilityTier::Medium => "Medium Credibility",
            CredibilityTier::Unknown => "Verify Source",
        }
    }

    /// Fallback credibility score for this tier.
    pub fn score(&self) -> f64 {
        match self {
            CredibilityTier::High => 0.9,
            CredibilityTier::Medium => 0.6,
            CredibilityTier::Unknown => 0.3,
        }
    }
}

/// Extract the host part of a URL, without any `www.` prefix.
///
/// Tolerates bare domains and garbage; returns `None` only when no
/// host-like token can be found at all.
pub fn domain_of(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);

    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);

    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Classify a source URL into a credibility tier via the local allow-list.
pub fn classify_domain(url: &str) -> CredibilityTier {
    let Some(domain) = domain_of(url) else {
        return CredibilityTier::Unknown;
    };

    if HIGH_CREDIBILITY_DOMAINS.iter().any(|d| domain.contains(d)) {
        CredibilityTier::High
    } else if MEDIUM_CREDIBILITY_DOMAINS.iter().any(|d| domain.contains(d)) {
        CredibilityTier::Medium
    } else {
        CredibilityTier::Unknown
    }
}

const SUPPORT_KEYWORDS: &[&str] = &[
    "confirms",
    "supports",
    "proves",
    "evidence shows",
    "research indicates",
];

const REFUTE_KEYWORDS: &[&str] = &[
    "denies",
    "contradicts",
    "disproves",
    "false",
    "incorrect",
    "myth",
];

/// Keyword-based stance fallback over a snippet.
///
/// A snippet matching only support keywords reads as supporting, only
/// refute keywords as refuting, and anything else (both, neither, or no
/// snippet) as neutral.
pub fn stance_from_snippet(snippet: Option<&str>) -> Stance {
    let Some(snippet) = snippet else {
        return Stance::Neutral;
    };
    let lower = snippet.to_lowercase();

    let supports = SUPPORT_KEYWORDS.iter().any(|w| lower.contains(w));
    let refutes = REFUTE_KEYWORDS.iter().any(|w| lower.contains(w));

    match (supports, refutes) {
        (true, false) => Stance::Supports,
        (false, true) => Stance::Refutes,
        _ => Stance::Neutral,
    }
}
