//! Remote snapshot sources.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::models::QuoteRecord;
use crate::util::{error_excerpt, has_http_scheme, non_blank, unix_timestamp_ms};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Remote request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid snapshot payload: {0}")]
    Payload(String),
    #[error("Remote did not respond within {0:?}")]
    Timeout(Duration),
    #[error("No remote source configured")]
    NotConfigured,
}

/// Where remote snapshots come from and where new quotes are pushed
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current remote snapshot
    fn fetch_snapshot(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<QuoteRecord>, FetchError>> + Send;

    /// Send one locally created quote upstream
    fn push_quote(
        &self,
        quote: &QuoteRecord,
    ) -> impl Future<Output = std::result::Result<(), FetchError>> + Send;
}

impl<S: SnapshotSource> SnapshotSource for Option<S> {
    async fn fetch_snapshot(&self) -> std::result::Result<Vec<QuoteRecord>, FetchError> {
        match self {
            Some(source) => source.fetch_snapshot().await,
            None => Err(FetchError::NotConfigured),
        }
    }

    async fn push_quote(&self, quote: &QuoteRecord) -> std::result::Result<(), FetchError> {
        match self {
            Some(source) => source.push_quote(quote).await,
            None => Err(FetchError::NotConfigured),
        }
    }
}

/// JSON-over-HTTP snapshot source.
///
/// `GET endpoint` must return an array of objects carrying `id` and `title`;
/// each becomes a quote in the configured category. `POST endpoint` receives
/// one serialized quote.
#[derive(Clone)]
pub struct HttpQuoteSource {
    endpoint: String,
    category: String,
    snapshot_limit: Option<usize>,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpQuoteSource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HttpQuoteSource")
            .field("endpoint", &self.endpoint)
            .field("category", &self.category)
            .field("snapshot_limit", &self.snapshot_limit)
            .finish_non_exhaustive()
    }
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::Config(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            endpoint,
            category: crate::config::DEFAULT_REMOTE_CATEGORY.to_string(),
            snapshot_limit: None,
            client,
        })
    }

    /// Source described by `settings`, or `None` when no remote URL is configured
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let Some(endpoint) = settings.remote_url() else {
            return Ok(None);
        };

        Ok(Some(
            Self::new(endpoint, settings.fetch_timeout())?
                .with_category(settings.remote_category.clone())
                .with_snapshot_limit(settings.snapshot_limit),
        ))
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.category = category.trim().to_string();
        }
        self
    }

    #[must_use]
    pub const fn with_snapshot_limit(mut self, limit: Option<usize>) -> Self {
        self.snapshot_limit = limit;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SnapshotSource for HttpQuoteSource {
    async fn fetch_snapshot(&self) -> std::result::Result<Vec<QuoteRecord>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response.text().await?;
        let snapshot = parse_snapshot(
            &body,
            &self.category,
            self.snapshot_limit,
            unix_timestamp_ms(),
        )?;
        tracing::debug!("Fetched {} quotes from {}", snapshot.len(), self.endpoint);
        Ok(snapshot)
    }

    async fn push_quote(&self, quote: &QuoteRecord) -> std::result::Result<(), FetchError> {
        let response = self.client.post(&self.endpoint).json(quote).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!("Pushed quote {} (HTTP {})", quote.id, status.as_u16());
        } else {
            tracing::warn!(
                "Remote rejected quote {} (HTTP {})",
                quote.id,
                status.as_u16()
            );
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RemoteItem {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "updatedAt")]
    updated_at: Option<i64>,
}

/// Convert a remote payload into quote records.
///
/// Items keep their `id`; `title` becomes the text and `category` is applied
/// to all of them. `updatedAt` is honoured when present, otherwise
/// `received_at` is used. Items without a title are dropped.
pub fn parse_snapshot(
    body: &str,
    category: &str,
    limit: Option<usize>,
    received_at: i64,
) -> std::result::Result<Vec<QuoteRecord>, FetchError> {
    let items: Vec<RemoteItem> =
        serde_json::from_str(body).map_err(|error| FetchError::Payload(error.to_string()))?;

    let take = limit.unwrap_or(usize::MAX);
    let mut dropped = 0usize;
    let snapshot = items
        .into_iter()
        .take(take)
        .filter_map(|item| {
            let Some(text) = non_blank(item.title) else {
                dropped += 1;
                return None;
            };
            Some(QuoteRecord::with_id(
                item.id,
                text,
                category,
                item.updated_at.unwrap_or(received_at),
            ))
        })
        .collect::<Vec<_>>();

    if dropped > 0 {
        tracing::warn!("Dropped {dropped} remote items without a title");
    }
    Ok(snapshot)
}

fn status_error(status: StatusCode, body: &str) -> FetchError {
    FetchError::Status {
        status: status.as_u16(),
        body: error_excerpt(body),
    }
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let endpoint = non_blank(Some(raw))
        .ok_or_else(|| Error::Config("remote endpoint must not be empty".to_string()))?;
    if has_http_scheme(&endpoint) {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "remote endpoint must include http:// or https://".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_error_keeps_a_single_line_excerpt() {
        let body = "<html>\n  <h1>Bad Gateway</h1>\n</html>";
        let error = status_error(StatusCode::BAD_GATEWAY, body);
        assert_eq!(
            error.to_string(),
            "Remote returned HTTP 502: <html> <h1>Bad Gateway</h1> </html>"
        );
    }

    #[test]
    fn parse_snapshot_maps_title_and_assigns_category() {
        let body = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "ignored"},
            {"userId": 1, "id": 2, "title": "qui est esse", "updatedAt": 5}
        ]"#;

        let snapshot = parse_snapshot(body, "Server", None, 1_000).unwrap();

        assert_eq!(
            snapshot,
            vec![
                QuoteRecord::with_id(1, "sunt aut facere", "Server", 1_000),
                QuoteRecord::with_id(2, "qui est esse", "Server", 5),
            ]
        );
    }

    #[test]
    fn parse_snapshot_applies_limit_and_drops_untitled_items() {
        let body = r#"[{"id": 1, "title": "a"}, {"id": 2, "title": "  "}, {"id": 3, "title": "c"}]"#;

        let limited = parse_snapshot(body, "Server", Some(2), 7).unwrap();
        assert_eq!(limited, vec![QuoteRecord::with_id(1, "a", "Server", 7)]);

        let all = parse_snapshot(body, "Server", None, 7).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn parse_snapshot_rejects_non_array_payload() {
        let error = parse_snapshot(r#"{"id": 1}"#, "Server", None, 0).unwrap_err();
        assert!(matches!(error, FetchError::Payload(_)));
    }

    #[test]
    fn new_rejects_invalid_endpoints() {
        assert!(HttpQuoteSource::new("  ", Duration::from_secs(1)).is_err());
        assert!(HttpQuoteSource::new("example.com/posts", Duration::from_secs(1)).is_err());

        let source = HttpQuoteSource::new("https://example.com/posts/", Duration::from_secs(1))
            .unwrap()
            .with_category("  ");
        assert_eq!(source.endpoint(), "https://example.com/posts");
        assert_eq!(source.category, "Server");
    }

    #[test]
    fn from_settings_without_remote_is_none() {
        let settings = Settings {
            remote_url: None,
            ..Settings::default()
        };
        assert!(HttpQuoteSource::from_settings(&settings).unwrap().is_none());
    }

    #[tokio::test]
    async fn unreachable_remote_is_a_fetch_error() {
        let source =
            HttpQuoteSource::new("http://127.0.0.1:9/posts", Duration::from_secs(2)).unwrap();
        assert!(source.fetch_snapshot().await.is_err());
    }

    #[tokio::test]
    async fn missing_source_reports_not_configured() {
        let source: Option<HttpQuoteSource> = None;
        assert!(matches!(
            source.fetch_snapshot().await,
            Err(FetchError::NotConfigured)
        ));
    }
}
