//! claimlens - fact-checking client for the terminal
//!
//! A client for a claim-verification backend: submit claims, browse
//! analyzed news, inspect per-article analyses, and keep a bounded local
//! history of past checks.
//!
//! # Architecture
//!
//! Everything network-facing sits behind the [`api::FactCheckApi`] trait;
//! the screens in [`views`] are state machines over that trait and are
//! tested against stubs. Wire payloads are normalized into [`domain`]
//! types at the API boundary, so the rest of the crate never sees the
//! backend's mixed vocabularies or units.
//!
//! # Modules
//!
//! - `api`: Backend trait plus the reqwest implementation
//! - `domain`: Verdicts, evidence, news, and wire normalization
//! - `history`: Bounded persisted list of past verifications
//! - `views`: Per-screen request lifecycles
//! - `render`: Pure text renderers
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Verify a claim
//! claimlens verify "The Earth is flat"
//!
//! # Browse debunked news
//! claimlens news --tab verified-false
//!
//! # Review past checks
//! claimlens history list --search earth
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod history;
pub mod render;
pub mod views;

// Re-export main types at crate root for convenience
pub use api::{ApiConfig, ApiError, FactCheckApi, HttpApiClient};
pub use domain::{Confidence, VerificationResult, VerificationStatus, Verdict};
pub use history::{HistoryEntry, HistoryQuery, HistoryStore, SortOrder, HISTORY_CAP};
pub use views::{ArticleView, NewsFeed, Phase, Tab, VerifySession};
