//! `AniListClient` - `AniList` GraphQL client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalAniListApi;
use super::executor::{RequestExecutor, RetryPolicy};
use super::params::{MediaSeason, MediaType, QueryVariables};
use super::query::QueryDocument;
use super::rate_limiter::{RateLimiter, SharedRateLimiter};
use super::types::{Media, MediaPage, MediaResponse, PageResponse};

/// Default GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co/";

/// Default HTTP timeout per dispatch.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `AniList` GraphQL client.
///
/// Cheap to clone: clones share the HTTP connection pool and rate limiter.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct AniListClient {
    /// Request executor.
    executor: RequestExecutor,
}

/// Builder for `AniListClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AniListClientBuilder {
    endpoint: Option<Url>,
    user_agent: Option<String>,
    origin: Option<String>,
    min_interval: Option<Duration>,
    rate_limiter: Option<SharedRateLimiter>,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
}

impl AniListClientBuilder {
    /// Creates a new builder.
    fn new() -> Self {
        Self {
            endpoint: None,
            user_agent: None,
            origin: None,
            min_interval: None,
            rate_limiter: None,
            retry_policy: RetryPolicy::default(),
            timeout: None,
        }
    }

    /// Overrides the GraphQL endpoint (proxies, wiremock in tests).
    #[must_use]
    pub fn endpoint(mut self, url: Url) -> Self {
        self.endpoint = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sends an `Origin` header with every request.
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the minimum request interval (default: 700ms).
    ///
    /// Ignored when a shared rate limiter is supplied.
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Uses an existing rate limiter, shared with other clients.
    #[must_use]
    pub fn rate_limiter(mut self, limiter: SharedRateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Sets the number of dispatch attempts per request (default: 3).
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry_policy = self.retry_policy.max_attempts(attempts);
        self
    }

    /// Sets the delay before the first retry (default: 1s, doubling).
    #[must_use]
    pub const fn base_delay(mut self, delay: Duration) -> Self {
        self.retry_policy = self.retry_policy.base_delay(delay);
        self
    }

    /// Chooses whether GraphQL `errors` responses are retried (default: true).
    #[must_use]
    pub const fn retry_upstream_errors(mut self, retry: bool) -> Self {
        self.retry_policy = self.retry_policy.retry_upstream_errors(retry);
        self
    }

    /// Sets the HTTP timeout per dispatch (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<AniListClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let endpoint = if let Some(url) = self.endpoint {
            url
        } else {
            let result = Url::parse(DEFAULT_ENDPOINT);
            result.context("invalid default endpoint URL")?
        };

        let rate_limiter = self.rate_limiter.unwrap_or_else(|| {
            self.min_interval
                .map_or_else(RateLimiter::default_interval, RateLimiter::new)
                .shared()
        });

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(AniListClient {
            executor: RequestExecutor::new(
                http_client,
                endpoint,
                self.origin,
                rate_limiter,
                self.retry_policy,
            ),
        })
    }
}

impl AniListClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> AniListClientBuilder {
        AniListClientBuilder::new()
    }

    /// Returns the underlying executor.
    #[must_use]
    pub const fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Executes `document` and decodes the payload into `T`.
    async fn query<T: DeserializeOwned>(
        &self,
        document: QueryDocument,
        variables: &QueryVariables,
    ) -> Result<T> {
        let payload = self.executor.execute(document, variables).await?;
        let raw_result: std::result::Result<T, _> = serde_json::from_value(payload);
        raw_result.with_context(|| format!("failed to decode {} response", document.name()))
    }

    /// Runs the list query without touching the sort.
    async fn search_page(&self, variables: &QueryVariables) -> Result<MediaPage> {
        let response: PageResponse = self.query(QueryDocument::Search, variables).await?;
        Ok(response.data.page)
    }

    /// Runs a single-item query.
    async fn single(&self, document: QueryDocument, id: u64) -> Result<Option<Media>> {
        let response: MediaResponse = self
            .query(document, &QueryVariables::for_id(id))
            .await?;
        if response.data.media.is_none() {
            tracing::debug!(id, "Media not found");
        }
        Ok(response.data.media)
    }
}

impl LocalAniListApi for AniListClient {
    #[instrument(skip_all)]
    async fn search_media(&self, variables: &QueryVariables) -> Result<MediaPage> {
        let variables = variables.clone().with_default_sort();
        self.search_page(&variables).await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn media_by_id(&self, id: u64) -> Result<Option<Media>> {
        self.single(QueryDocument::ById, id).await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn media_with_details(&self, id: u64) -> Result<Option<Media>> {
        self.single(QueryDocument::Detail, id).await
    }

    #[instrument(skip_all)]
    async fn top_media(
        &self,
        media_type: MediaType,
        page: u32,
        per_page: u32,
    ) -> Result<MediaPage> {
        self.search_page(&QueryVariables::top(media_type, page, per_page))
            .await
    }

    #[instrument(skip_all)]
    async fn media_by_genre(
        &self,
        genre: &str,
        media_type: MediaType,
        page: u32,
    ) -> Result<MediaPage> {
        self.search_page(&QueryVariables::by_genre(genre, media_type, page))
            .await
    }

    #[instrument(skip_all)]
    async fn seasonal_anime(
        &self,
        season: MediaSeason,
        year: i32,
        page: u32,
    ) -> Result<MediaPage> {
        self.search_page(&QueryVariables::seasonal(season, year, page))
            .await
    }

    #[instrument(skip_all)]
    async fn media_by_studio(
        &self,
        studio: &str,
        media_type: MediaType,
        page: u32,
    ) -> Result<MediaPage> {
        self.search_page(&QueryVariables::by_studio(studio, media_type, page))
            .await
    }
}
