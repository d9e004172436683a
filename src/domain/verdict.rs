//! Verdict and confidence normalization.
//!
//! The backend has shipped two verdict vocabularies over time
//! (`TRUE/FALSE/MISLEADING/UNCLEAR` and
//! `likely_true/likely_false/mixed_evidence/insufficient_data`).
//! Both are mapped onto one internal enum at the API boundary so nothing
//! downstream ever branches on raw backend strings.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Categorical outcome of a claim verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    True,
    False,
    Misleading,
    Unclear,
}

impl Verdict {
    /// Parse a verdict from either external vocabulary.
    ///
    /// Unknown strings map to `Unclear` rather than failing; the backend
    /// occasionally emits values we have never seen.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "likely_true" => Verdict::True,
            "false" | "likely_false" => Verdict::False,
            "misleading" | "mixed_evidence" | "mixed" => Verdict::Misleading,
            _ => Verdict::Unclear,
        }
    }

    /// Display label, matching the union of both vocabularies.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::True => "True",
            Verdict::False => "False",
            Verdict::Misleading => "Mixed Evidence",
            Verdict::Unclear => "Unverified",
        }
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Verdict::Unclear
    }
}

/// Verification status attached to pre-analyzed news articles.
///
/// Reconciles the listing vocabulary (`verified_true/verified_false/
/// likely_true/questionable/unverified`) with the plain verdict strings
/// some feeds use instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    VerifiedTrue,
    VerifiedFalse,
    LikelyTrue,
    Questionable,
    Unverified,
}

impl VerificationStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "verified_true" | "true" => VerificationStatus::VerifiedTrue,
            "verified_false" | "false" => VerificationStatus::VerifiedFalse,
            "likely_true" => VerificationStatus::LikelyTrue,
            "questionable" | "misleading" | "mixed_evidence" => VerificationStatus::Questionable,
            _ => VerificationStatus::Unverified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerificationStatus::VerifiedTrue => "VERIFIED TRUE",
            VerificationStatus::VerifiedFalse => "DEBUNKED",
            VerificationStatus::LikelyTrue => "LIKELY TRUE",
            VerificationStatus::Questionable => "QUESTIONABLE",
            VerificationStatus::Unverified => "UNVERIFIED",
        }
    }

    /// Whether this status counts as a positive verification.
    pub fn is_verified_true(&self) -> bool {
        matches!(
            self,
            VerificationStatus::VerifiedTrue | VerificationStatus::LikelyTrue
        )
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        VerificationStatus::Unverified
    }
}

/// Confidence score, always stored as a fraction in [0, 1].
///
/// The backend reports either a fraction or an integer percentage
/// depending on the endpoint; both are accepted and normalized once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0.0);

    /// Normalize a raw score. Values above 1 are treated as percentages.
    pub fn from_raw(raw: f64) -> Self {
        let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
        Confidence(fraction.clamp(0.0, 1.0))
    }

    pub fn as_fraction(&self) -> f64 {
        self.0
    }

    pub fn as_percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::ZERO
    }
}

/// Normalize a wire timestamp to `DateTime<Utc>`.
///
/// Accepts RFC 3339 strings, epoch seconds, and epoch milliseconds
/// (numeric values at or above 10^12 are taken as milliseconds).
/// Returns `None` for anything unparseable.
pub fn parse_wire_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        serde_json::Value::Number(n) => {
            let raw = n.as_f64()?;
            let millis = if raw >= 1e12 { raw } else { raw * 1000.0 };
            Utc.timestamp_millis_opt(millis as i64).single()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_uppercase_vocabulary() {
        assert_eq!(Verdict::from_wire("TRUE"), Verdict::True);
        assert_eq!(Verdict::from_wire("FALSE"), Verdict::False);
        assert_eq!(Verdict::from_wire("MISLEADING"), Verdict::Misleading);
        assert_eq!(Verdict::from_wire("UNCLEAR"), Verdict::Unclear);
    }

    #[test]
    fn test_verdict_snake_vocabulary() {
        assert_eq!(Verdict::from_wire("likely_true"), Verdict::True);
        assert_eq!(Verdict::from_wire("likely_false"), Verdict::False);
        assert_eq!(Verdict::from_wire("mixed_evidence"), Verdict::Misleading);
        assert_eq!(Verdict::from_wire("insufficient_data"), Verdict::Unclear);
    }

    #[test]
    fn test_verdict_unknown_maps_to_unclear() {
        assert_eq!(Verdict::from_wire("banana"), Verdict::Unclear);
        assert_eq!(Verdict::from_wire(""), Verdict::Unclear);
    }

    #[test]
    fn test_status_vocabularies() {
        assert_eq!(
            VerificationStatus::from_wire("verified_true"),
            VerificationStatus::VerifiedTrue
        );
        assert_eq!(
            VerificationStatus::from_wire("TRUE"),
            VerificationStatus::VerifiedTrue
        );
        assert_eq!(
            VerificationStatus::from_wire("FALSE"),
            VerificationStatus::VerifiedFalse
        );
        assert_eq!(
            VerificationStatus::from_wire("questionable"),
            VerificationStatus::Questionable
        );
        assert_eq!(
            VerificationStatus::from_wire("UNCLEAR"),
            VerificationStatus::Unverified
        );
    }

    #[test]
    fn test_confidence_fraction_passthrough() {
        assert_eq!(Confidence::from_raw(0.92).as_fraction(), 0.92);
        assert_eq!(Confidence::from_raw(0.92).as_percent(), 92);
    }

    #[test]
    fn test_confidence_percentage_normalized() {
        assert_eq!(Confidence::from_raw(92.0).as_fraction(), 0.92);
        assert_eq!(Confidence::from_raw(50.0).as_percent(), 50);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Confidence::from_raw(150.0).as_fraction(), 1.0);
        assert_eq!(Confidence::from_raw(-0.5).as_fraction(), 0.0);
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let value = serde_json::json!("2024-06-01T12:00:00Z");
        let ts = parse_wire_timestamp(&value).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }

    #[test]
    fn test_timestamp_seconds_and_millis() {
        let secs = serde_json::json!(1_717_243_200);
        let millis = serde_json::json!(1_717_243_200_000i64);
        assert_eq!(
            parse_wire_timestamp(&secs),
            parse_wire_timestamp(&millis)
        );
    }

    #[test]
    fn test_timestamp_garbage_is_none() {
        assert!(parse_wire_timestamp(&serde_json::json!("not a date")).is_none());
        assert!(parse_wire_timestamp(&serde_json::json!(null)).is_none());
    }
}
