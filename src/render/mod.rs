//! Stateless text renderers.
//!
//! Pure functions of their inputs; no I/O, no side effects. The CLI
//! prints what these return.

use crate::domain::{
    classify_domain, ArticleDetail, NewsArticle, NewsDetail, SourceEvidence, VerificationResult,
};
use crate::history::HistoryEntry;

const SNIPPET_LIMIT: usize = 300;

/// Bracketed verdict badge, e.g. `[FALSE] False`.
pub fn verdict_badge(result: &VerificationResult) -> String {
    let tag = match result.verdict {
        crate::domain::Verdict::True => "TRUE",
        crate::domain::Verdict::False => "FALSE",
        crate::domain::Verdict::Misleading => "MISLEADING",
        crate::domain::Verdict::Unclear => "UNCLEAR",
    };
    format!("[{tag}] {}", result.verdict.label())
}

/// Relevance bucket from a similarity score.
pub fn relevance_label(similarity: f64) -> &'static str {
    if similarity >= 0.75 {
        "High Relevance"
    } else if similarity >= 0.45 {
        "Medium Relevance"
    } else {
        "Low Relevance"
    }
}

/// Truncate a snippet for card display, respecting char boundaries.
pub fn truncate_snippet(snippet: &str) -> String {
    if snippet.chars().count() <= SNIPPET_LIMIT {
        return snippet.to_string();
    }
    let cut: String = snippet.chars().take(SNIPPET_LIMIT).collect();
    format!("{cut}...")
}

/// The three-cell metrics grid under a verdict.
pub fn metrics_grid(result: &VerificationResult) -> String {
    let credibility = result
        .credibility_score
        .map(|c| format!("{:.0}%", c * 100.0))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Credibility Score: {credibility}  |  Evidence Quality: {}  |  Sources Analyzed: {}",
        result.evidence_quality().label(),
        result.evidence.len()
    )
}

/// Full results panel for one verification.
pub fn verification_panel(claim: &str, result: &VerificationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Claim: \"{claim}\"\n"));
    out.push_str(&format!(
        "{}  |  Confidence: {}%\n",
        verdict_badge(result),
        result.confidence.as_percent()
    ));
    if let Some(explanation) = &result.explanation {
        out.push_str(&format!("Analysis: {explanation}\n"));
    }
    out.push_str(&metrics_grid(result));
    out.push('\n');

    if let Some(stats) = &result.stats {
        out.push_str(&format!(
            "Supporting: {}  Refuting: {}  Neutral: {}\n",
            stats.supporting, stats.refuting, stats.neutral
        ));
    }

    if !result.evidence.is_empty() {
        out.push_str("\nSource Analysis:\n");
        for (i, source) in result.evidence.iter().enumerate() {
            out.push_str(&source_card(source, i));
        }
    }

    out.push_str(&format!(
        "\nAnalyzed on {}\n",
        result.timestamp.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

/// One evidence source as a card.
pub fn source_card(source: &SourceEvidence, index: usize) -> String {
    let mut out = String::new();

    let domain_line = match &source.url {
        Some(url) => {
            let tier = classify_domain(url);
            let domain = crate::domain::domain_of(url).unwrap_or_else(|| url.clone());
            format!("{domain} ({})", tier.label())
        }
        None => "Local Cache".to_string(),
    };

    out.push_str(&format!(
        "  Source {}: {}  |  {domain_line}\n",
        index + 1,
        source.title
    ));

    if let Some(snippet) = &source.snippet {
        out.push_str(&format!("    {}\n", truncate_snippet(snippet)));
    }

    out.push_str(&format!(
        "    {}  |  {}  |  Similarity: {:.1}%  |  Credibility: {:.0}%  |  Stance Confidence: {:.0}%\n",
        source.stance.label(),
        relevance_label(source.similarity),
        source.similarity * 100.0,
        source.source_credibility * 100.0,
        source.stance_confidence.as_fraction() * 100.0,
    ));

    if let Some(url) = &source.url {
        out.push_str(&format!("    {url}\n"));
    }

    out
}

/// One line per news article for the listing.
pub fn news_line(article: &NewsArticle) -> String {
    let trust = article
        .trust_score
        .map(|t| format!("  trust {:.0}%", t * 100.0))
        .unwrap_or_default();

    let source = article
        .source
        .as_deref()
        .map(|s| format!("  ({s})"))
        .unwrap_or_default();

    format!(
        "[{}] {}{source}{trust}",
        article.status.label(),
        article.title
    )
}

/// Header block for an article-detail screen.
pub fn article_panel(detail: &ArticleDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", detail.title));
    out.push_str(&format!(
        "Verdict: {} ({:.0}%)\n",
        detail.verdict.label(),
        detail.overall_score.as_fraction() * 100.0
    ));

    if let Some(stance) = &detail.stance {
        out.push_str(&format!(
            "Stance: {stance} ({:.0}% confidence)\n",
            detail.stance_confidence.as_fraction() * 100.0
        ));
    }
    out.push_str(&format!(
        "Source Credibility: {:.0}%\n",
        detail.source_credibility * 100.0
    ));
    if let Some(len) = detail.content_length {
        out.push_str(&format!("Content Analyzed: {len} characters\n"));
    }
    if let Some(domain) = &detail.source_info.domain {
        out.push_str(&format!("Domain: {domain}\n"));
    }

    if let Some(preview) = &detail.content_preview {
        out.push_str(&format!("\n{}\n", truncate_snippet(preview)));
    }

    if !detail.context_articles.is_empty() {
        out.push_str("\nRelated Articles:\n");
        for related in &detail.context_articles {
            out.push_str(&format!(
                "  {} ({:.0}% similar)\n",
                related.title,
                related.similarity * 100.0
            ));
            if let Some(url) = &related.url {
                out.push_str(&format!("    {url}\n"));
            }
        }
    }

    out
}

/// Detail screen for one stored news item.
pub fn news_detail_panel(detail: &NewsDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", detail.title));
    if let Some(source) = &detail.source {
        out.push_str(&format!("Source: {source}\n"));
    }
    if let Some(published) = detail.published_at {
        out.push_str(&format!(
            "Published: {}\n",
            published.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    out.push_str(&format!(
        "\n{}  |  Confidence: {}%\n",
        verdict_badge(&detail.analysis),
        detail.analysis.confidence.as_percent()
    ));
    if let Some(explanation) = &detail.analysis.explanation {
        out.push_str(&format!("Analysis: {explanation}\n"));
    }

    if let Some(text) = &detail.full_text {
        out.push_str(&format!("\n{}\n", truncate_snippet(text)));
    }

    out
}

/// One line per history entry.
pub fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "{}  [{}] {}% | {}  (id {})",
        entry.timestamp.format("%Y-%m-%d %H:%M"),
        entry.verdict.label(),
        entry.confidence.as_percent(),
        entry.claim,
        entry.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, Stance, Verdict, VerificationResult};
    use chrono::Utc;

    fn result() -> VerificationResult {
        VerificationResult {
            verdict: Verdict::False,
            confidence: Confidence::from_raw(0.92),
            explanation: Some("Refuted".to_string()),
            evidence: vec![SourceEvidence {
                title: "Checked".to_string(),
                url: Some("https://www.bbc.com/1".to_string()),
                snippet: Some("x".repeat(400)),
                similarity: 0.8,
                stance: Stance::Refutes,
                stance_confidence: Confidence::from_raw(0.9),
                source_credibility: 0.9,
            }],
            stats: None,
            credibility_score: Some(0.4),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_verdict_badge() {
        assert_eq!(verdict_badge(&result()), "[FALSE] False");
    }

    #[test]
    fn test_relevance_buckets() {
        assert_eq!(relevance_label(0.9), "High Relevance");
        assert_eq!(relevance_label(0.5), "Medium Relevance");
        assert_eq!(relevance_label(0.1), "Low Relevance");
    }

    #[test]
    fn test_snippet_truncation() {
        let long = "y".repeat(400);
        let rendered = truncate_snippet(&long);
        assert!(rendered.ends_with("..."));
        assert_eq!(rendered.chars().count(), 303);

        assert_eq!(truncate_snippet("short"), "short");
    }

    #[test]
    fn test_panel_contains_confidence_percent() {
        let panel = verification_panel("The Earth is flat", &result());
        assert!(panel.contains("92%"));
        assert!(panel.contains("[FALSE] False"));
        assert!(panel.contains("bbc.com (High Credibility)"));
    }

    #[test]
    fn test_metrics_grid_without_credibility() {
        let mut r = result();
        r.credibility_score = None;
        assert!(metrics_grid(&r).contains("Credibility Score: N/A"));
    }
}
