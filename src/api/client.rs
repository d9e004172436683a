//! HTTP implementation of the backend API.
//!
//! Every call follows the same path: issue the request, reject non-2xx
//! statuses, parse JSON, unwrap the `{status, data, message}` envelope
//! where the route uses one, then normalize into domain types.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, FactCheckApi};
use crate::domain::{
    ArticleDetail, HomepageNews, NewsArticle, NewsDetail, RawArticleDetail, RawHomepageNews,
    RawNewsArticle, RawNewsDetail, RawVerification, VerificationResult,
};

/// Explicitly constructed client configuration; nothing here is global.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base endpoint, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Per-request deadline. The original client had none; a hung call
    /// would spin forever, so we cap it here.
    pub timeout: Duration,
    /// Language hint sent with verification requests when set.
    pub default_lang: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            default_lang: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = Some(lang.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    claim: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'a str>,
}

/// Backend client over reqwest.
pub struct HttpApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.json::<Value>().await?;
        unwrap_envelope(body)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.json::<Value>().await?;
        unwrap_envelope(body)
    }
}

/// Unwrap the backend's `{status, data, message}` envelope.
///
/// Routes without the convention return their body directly; those pass
/// through untouched. A present non-"success" status is a failure even on
/// HTTP 200.
pub(crate) fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    let Some(status) = body.get("status").and_then(Value::as_str) else {
        return Ok(body);
    };

    if status != "success" {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        return Err(ApiError::Backend { message });
    }

    match body.get("data") {
        Some(data) => Ok(data.clone()),
        // Some success responses inline their payload next to the status.
        None => Ok(body),
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("{what}: {e}")))
}

#[async_trait]
impl FactCheckApi for HttpApiClient {
    async fn verify_claim(
        &self,
        claim: &str,
        lang: Option<&str>,
    ) -> Result<VerificationResult, ApiError> {
        let lang = lang.or(self.config.default_lang.as_deref());
        let body = self
            .post_json("/api/verify", &VerifyRequest { claim, lang })
            .await?;

        let raw: RawVerification = decode(body, "verification result")?;
        Ok(raw.normalize())
    }

    async fn latest_news(
        &self,
        limit: usize,
        cache_bust: bool,
    ) -> Result<Vec<NewsArticle>, ApiError> {
        let mut query = vec![("limit", limit.to_string())];
        if cache_bust {
            query.push(("_t", Utc::now().timestamp_millis().to_string()));
        }

        let body = self.get_json("/api/latest_news", &query).await?;

        // The route wraps its list in `{news: [...]}`; tolerate a bare
        // array as well.
        let items = match body {
            Value::Object(mut map) => map.remove("news").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };

        let raw: Vec<RawNewsArticle> = decode(items, "news list")?;
        Ok(raw.into_iter().map(RawNewsArticle::normalize).collect())
    }

    async fn news_detail(&self, id: &str) -> Result<NewsDetail, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "news id must not be empty".to_string(),
            ));
        }

        let body = self.get_json(&format!("/api/news/{id}"), &[]).await?;
        let raw: RawNewsDetail = decode(body, "news detail")?;
        Ok(raw.normalize())
    }

    async fn article_details(
        &self,
        id: &str,
        url: &str,
        title: Option<&str>,
    ) -> Result<ArticleDetail, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "article id must not be empty".to_string(),
            ));
        }
        if url.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "Article URL not provided".to_string(),
            ));
        }

        let query = vec![
            ("url", url.to_string()),
            ("title", title.unwrap_or("").to_string()),
        ];
        let body = self.get_json(&format!("/api/article/{id}"), &query).await?;
        let raw: RawArticleDetail = decode(body, "article detail")?;
        Ok(raw.normalize())
    }

    async fn homepage_news(&self) -> Result<HomepageNews, ApiError> {
        let body = self.get_json("/api/homepage-news", &[]).await?;
        let raw: RawHomepageNews = decode(body, "homepage news")?;
        Ok(raw.normalize())
    }

    async fn health(&self) -> Result<serde_json::Value, ApiError> {
        let url = self.url("/api/health");
        debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        // Health payloads carry their own `status` wording ("healthy");
        // they are not enveloped, so skip the unwrap.
        Ok(response.json::<Value>().await?)
    }
}
