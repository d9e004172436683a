//! Verification results and supporting evidence.
//!
//! These are the value objects the API client hands back after
//! normalization. They are immutable once constructed; views hold their
//! own copies and never share them mutably.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credibility::{classify_domain, stance_from_snippet};
use super::verdict::{parse_wire_timestamp, Confidence, Verdict};

/// Whether a source supports, refutes, or is neutral toward a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Supports,
    Refutes,
    Neutral,
}

impl Stance {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "supports" | "support" => Stance::Supports,
            "refutes" | "refute" | "contradicts" => Stance::Refutes,
            _ => Stance::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stance::Supports => "Supports",
            Stance::Refutes => "Refutes",
            Stance::Neutral => "Neutral",
        }
    }
}

impl Default for Stance {
    fn default() -> Self {
        Stance::Neutral
    }
}

/// One external article cited for or against a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEvidence {
    pub title: String,
    pub url: Option<String>,
    pub snippet: Option<String>,
    /// Semantic relevance of this source to the claim, in [0, 1].
    pub similarity: f64,
    pub stance: Stance,
    pub stance_confidence: Confidence,
    /// Trustworthiness of the source domain, in [0, 1].
    pub source_credibility: f64,
}

/// Aggregate counts over the evidence set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceStats {
    #[serde(default)]
    pub supporting: u32,
    #[serde(default)]
    pub refuting: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub total_articles: u32,
    #[serde(default)]
    pub high_credibility_sources: u32,
}

/// Derived evidence-quality bucket shown in the metrics grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceQuality {
    High,
    Medium,
    Low,
    NotAvailable,
}

impl EvidenceQuality {
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceQuality::High => "High",
            EvidenceQuality::Medium => "Medium",
            EvidenceQuality::Low => "Low",
            EvidenceQuality::NotAvailable => "N/A",
        }
    }
}

/// Outcome of verifying a single claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub confidence: Confidence,
    pub explanation: Option<String>,
    pub evidence: Vec<SourceEvidence>,
    pub stats: Option<EvidenceStats>,
    /// Aggregate credibility over all cited sources, in [0, 1].
    pub credibility_score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl VerificationResult {
    /// Degraded result used when the backend could not be reached, so the
    /// results panel still has something to render.
    pub fn could_not_verify(reason: &str) -> Self {
        Self {
            verdict: Verdict::Unclear,
            confidence: Confidence::ZERO,
            explanation: Some(format!("Could not verify this claim: {reason}")),
            evidence: Vec::new(),
            stats: None,
            credibility_score: None,
            timestamp: Utc::now(),
        }
    }

    /// Evidence-quality bucket: decisive verdicts with sources rate High,
    /// mixed evidence Medium, everything else Low; no sources at all is N/A.
    pub fn evidence_quality(&self) -> EvidenceQuality {
        if self.evidence.is_empty() {
            return EvidenceQuality::NotAvailable;
        }
        match self.verdict {
            Verdict::True | Verdict::False => EvidenceQuality::High,
            Verdict::Misleading => EvidenceQuality::Medium,
            Verdict::Unclear => EvidenceQuality::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire-side raw shapes
// ---------------------------------------------------------------------------

/// Verification payload as the backend sends it, before normalization.
#[derive(Debug, Deserialize)]
pub struct RawVerification {
    #[serde(default, alias = "status")]
    pub verdict: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Newer payloads call this `evidence`, older ones `analysis`.
    #[serde(default, alias = "analysis")]
    pub evidence: Vec<RawEvidence>,
    #[serde(default)]
    pub stats: Option<EvidenceStats>,
    #[serde(default)]
    pub credibility_score: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawEvidence {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "source")]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub stance: Option<String>,
    #[serde(default)]
    pub stance_confidence: Option<f64>,
    #[serde(default)]
    pub source_credibility: Option<f64>,
}

impl RawEvidence {
    /// Normalize one evidence item, filling stance and credibility from
    /// local fallbacks where the backend left them out.
    pub fn normalize(self) -> SourceEvidence {
        let stance = match self.stance.as_deref() {
            Some(raw) => Stance::from_wire(raw),
            None => stance_from_snippet(self.snippet.as_deref()),
        };

        let source_credibility = self
            .source_credibility
            .map(|c| Confidence::from_raw(c).as_fraction())
            .unwrap_or_else(|| {
                self.url
                    .as_deref()
                    .map(classify_domain)
                    .map(|tier| tier.score())
                    .unwrap_or(0.3)
            });

        SourceEvidence {
            title: self.title.unwrap_or_else(|| "Source Article".to_string()),
            url: self.url.filter(|u| !u.trim().is_empty()),
            snippet: self.snippet,
            similarity: self.similarity.unwrap_or(0.0).clamp(0.0, 1.0),
            stance,
            stance_confidence: Confidence::from_raw(self.stance_confidence.unwrap_or(0.0)),
            source_credibility,
        }
    }
}

impl RawVerification {
    pub fn normalize(self) -> VerificationResult {
        let timestamp = self
            .timestamp
            .as_ref()
            .and_then(parse_wire_timestamp)
            .unwrap_or_else(Utc::now);

        VerificationResult {
            verdict: self
                .verdict
                .as_deref()
                .map(Verdict::from_wire)
                .unwrap_or_default(),
            confidence: Confidence::from_raw(self.confidence.unwrap_or(0.0)),
            explanation: self.explanation,
            evidence: self.evidence.into_iter().map(RawEvidence::normalize).collect(),
            stats: self.stats,
            credibility_score: self
                .credibility_score
                .map(|c| Confidence::from_raw(c).as_fraction()),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from_json(json: serde_json::Value) -> RawVerification {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_normalize_uppercase_payload() {
        let raw = raw_from_json(serde_json::json!({
            "verdict": "FALSE",
            "confidence": 0.92,
            "explanation": "Refuted by multiple sources",
            "evidence": [{
                "title": "Earth observed to be round",
                "url": "https://www.bbc.com/science/1",
                "snippet": "Satellite imagery disproves the claim",
                "similarity": 0.88,
                "stance": "refutes",
                "stance_confidence": 0.9
            }],
            "timestamp": "2024-06-01T12:00:00Z"
        }));

        let result = raw.normalize();
        assert_eq!(result.verdict, Verdict::False);
        assert_eq!(result.confidence.as_percent(), 92);
        assert_eq!(result.evidence.len(), 1);
        let source = &result.evidence[0];
        assert_eq!(source.stance, Stance::Refutes);
        // No backend credibility, so the bbc.com tier fallback applies.
        assert_eq!(source.source_credibility, 0.9);
    }

    #[test]
    fn test_normalize_legacy_payload() {
        // Old shape: percentage confidence, `analysis` array, epoch seconds.
        let raw = raw_from_json(serde_json::json!({
            "verdict": "likely_false",
            "confidence": 85,
            "analysis": [{
                "title": "Fact check",
                "url": "https://example.org/a",
                "snippet": "The claim is incorrect",
                "similarity": 0.7,
                "stance_confidence": 60
            }],
            "stats": {"supporting": 0, "refuting": 3, "neutral": 1, "total_articles": 4},
            "credibility_score": 40,
            "timestamp": 1717243200
        }));

        let result = raw.normalize();
        assert_eq!(result.verdict, Verdict::False);
        assert_eq!(result.confidence.as_fraction(), 0.85);
        assert_eq!(result.credibility_score, Some(0.40));
        assert_eq!(result.stats.as_ref().unwrap().refuting, 3);

        let source = &result.evidence[0];
        // Stance missing from the payload; keyword fallback kicks in.
        assert_eq!(source.stance, Stance::Refutes);
        assert_eq!(source.stance_confidence.as_fraction(), 0.6);
        // example.org is not on the allow-list.
        assert_eq!(source.source_credibility, 0.3);
    }

    #[test]
    fn test_empty_payload_defaults() {
        let result = raw_from_json(serde_json::json!({})).normalize();
        assert_eq!(result.verdict, Verdict::Unclear);
        assert_eq!(result.confidence, Confidence::ZERO);
        assert!(result.evidence.is_empty());
        assert_eq!(result.evidence_quality(), EvidenceQuality::NotAvailable);
    }

    #[test]
    fn test_evidence_quality_buckets() {
        let mut result = VerificationResult::could_not_verify("offline");
        assert_eq!(result.evidence_quality(), EvidenceQuality::NotAvailable);

        result.evidence.push(SourceEvidence {
            title: "x".into(),
            url: None,
            snippet: None,
            similarity: 0.5,
            stance: Stance::Neutral,
            stance_confidence: Confidence::ZERO,
            source_credibility: 0.3,
        });
        assert_eq!(result.evidence_quality(), EvidenceQuality::Low);

        result.verdict = Verdict::Misleading;
        assert_eq!(result.evidence_quality(), EvidenceQuality::Medium);

        result.verdict = Verdict::True;
        assert_eq!(result.evidence_quality(), EvidenceQuality::High);
    }

    #[test]
    fn test_soft_failure_result_renders() {
        let result = VerificationResult::could_not_verify("connection refused");
        assert_eq!(result.verdict, Verdict::Unclear);
        assert_eq!(result.confidence.as_percent(), 0);
        assert!(result.explanation.as_ref().unwrap().contains("connection refused"));
    }
}
