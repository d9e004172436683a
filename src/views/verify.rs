//! Claim verification lifecycle.
//!
//! Owns the full flow for one claim: validate input, call the backend,
//! shape the result, and record it in history. Submitting an empty claim
//! is a local validation failure that never reaches the network.

use tracing::{debug, warn};

use super::Phase;
use crate::api::FactCheckApi;
use crate::domain::VerificationResult;
use crate::history::{HistoryEntry, HistoryStore};

const EMPTY_CLAIM_MESSAGE: &str = "Please enter a claim to verify";

pub struct VerifySession {
    claim: String,
    phase: Phase,
    result: Option<VerificationResult>,
    error: Option<String>,
}

impl Default for VerifySession {
    fn default() -> Self {
        Self::new()
    }
}

impl VerifySession {
    pub fn new() -> Self {
        Self {
            claim: String::new(),
            phase: Phase::Idle,
            result: None,
            error: None,
        }
    }

    pub fn set_claim(&mut self, text: impl Into<String>) {
        self.claim = text.into();
    }

    pub fn claim(&self) -> &str {
        &self.claim
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit is only available from `Idle` with a non-blank claim.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle && !self.claim.trim().is_empty()
    }

    /// Run one verification.
    ///
    /// A blank claim sets an inline error and stays `Idle` without any
    /// network attempt. A submit outside `Idle` is a no-op. On success the
    /// result is stored and exactly one history entry is appended; a
    /// failed append is logged and never surfaced. On failure the session
    /// moves to `Error` but also synthesizes a degraded "could not verify"
    /// result so the results panel renders rather than going blank.
    pub async fn submit(
        &mut self,
        api: &dyn FactCheckApi,
        history: &mut HistoryStore,
        lang: Option<&str>,
    ) {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "submit ignored outside idle");
            return;
        }

        let claim = self.claim.trim().to_string();
        if claim.is_empty() {
            self.error = Some(EMPTY_CLAIM_MESSAGE.to_string());
            return;
        }

        self.phase = Phase::Loading;
        self.result = None;
        self.error = None;

        match api.verify_claim(&claim, lang).await {
            Ok(result) => {
                let entry = HistoryEntry::from_result(&claim, &result);
                if let Err(e) = history.append(entry) {
                    warn!("failed to record verification in history: {e}");
                }
                self.result = Some(result);
                self.phase = Phase::Success;
            }
            Err(e) => {
                let message = e.user_message();
                // Keep a renderable result alongside the error; no history
                // entry is written for failed verifications.
                self.result = Some(VerificationResult::could_not_verify(&message));
                self.error = Some(message);
                self.phase = Phase::Error;
            }
        }
    }

    /// Reset claim text, result, and error; back to `Idle` from anywhere.
    pub fn new_claim(&mut self) {
        self.claim.clear();
        self.result = None;
        self.error = None;
        self.phase = Phase::Idle;
    }
}
