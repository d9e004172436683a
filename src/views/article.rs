//! Article detail lifecycle.
//!
//! The detail screen needs the article id plus the original URL (and
//! ideally the title) carried over from the listing. Without a URL the
//! backend cannot analyze anything, so a missing URL is a user-visible
//! error raised before any network call.

use super::Phase;
use crate::api::FactCheckApi;
use crate::domain::ArticleDetail;

const MISSING_URL_MESSAGE: &str = "Article URL not provided";

#[derive(Default)]
pub struct ArticleView {
    phase: Phase,
    article: Option<ArticleDetail>,
    error: Option<String>,
}

impl ArticleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn article(&self) -> Option<&ArticleDetail> {
        self.article.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(
        &mut self,
        api: &dyn FactCheckApi,
        id: &str,
        url: Option<&str>,
        title: Option<&str>,
    ) {
        if self.phase == Phase::Loading {
            return;
        }

        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            self.error = Some(MISSING_URL_MESSAGE.to_string());
            self.phase = Phase::Error;
            return;
        };

        self.phase = Phase::Loading;
        self.error = None;
        self.article = None;

        match api.article_details(id, url, title).await {
            Ok(article) => {
                self.article = Some(article);
                self.phase = Phase::Success;
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.phase = Phase::Error;
            }
        }
    }
}
