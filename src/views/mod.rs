//! Request-lifecycle state machines behind each screen.
//!
//! Every view owns one lifecycle: `Idle -> Loading -> Success | Error`,
//! with an explicit reset back to `Idle`. A view drives at most one
//! request at a time and nothing here is shared mutably between views;
//! the history store is the only cross-view resource.

pub mod article;
pub mod news;
pub mod verify;

pub use article::ArticleView;
pub use news::{NewsFeed, Tab};
pub use verify::VerifySession;

/// Lifecycle phase shared by all views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
