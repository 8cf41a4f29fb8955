//! HTTP implementation of [`FileDbApi`]

use super::error::ApiError;
use super::query::SearchQuery;
use super::types::{Envelope, StatusInfo, TagList};
use super::update::UpdateRequest;
use super::FileDbApi;
use crate::record::{Record, content_uri};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, info, warn};

/// Name of the server's session cookie
pub const ACCOUNT_COOKIE: &str = "filedb_account";

/// FileDb client over HTTP
#[derive(Debug, Clone)]
pub struct FileDbClient {
    http: Client,
    base_url: String,
}

impl FileDbClient {
    /// Client for the server at `base_url`, without an account
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_account(base_url, None)
    }

    /// Client that sends `filedb_account=<cookie>` with every request
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidCookie` if the cookie is not a valid header
    /// value, or `ApiError::Transport` if the HTTP client cannot be built.
    pub fn with_account(base_url: &str, cookie: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("{ACCOUNT_COOKIE}={cookie}"))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, uri: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{uri}", self.base_url))
    }

    /// Send a request and decode its envelope
    ///
    /// The HTTP status is ignored; the envelope's `Code` decides.
    async fn send(&self, label: &str, builder: RequestBuilder) -> Result<Envelope, ApiError> {
        debug!(request = label, "sending request");
        let body = builder.send().await?.text().await?;
        let envelope: Envelope = serde_json::from_str(&body)?;
        if !envelope.is_ok() {
            warn!(request = label, code = envelope.code, data = %envelope.data, "request failed");
        }
        Ok(envelope)
    }
}

#[async_trait]
impl FileDbApi for FileDbClient {
    async fn get_file(&self, id: u64, touch: bool) -> Result<Record, ApiError> {
        let uri = format!("/api/1/files?id={id}&update={touch}");
        let builder = self
            .request(Method::GET, "/api/1/files")
            .query(&[("id", id.to_string()), ("update", touch.to_string())]);
        let files: Option<Vec<Record>> = self.send(&uri, builder).await?.into_data()?;
        files
            .and_then(|f| f.into_iter().next())
            .ok_or(ApiError::EmptyResult(uri))
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, ApiError> {
        query.validate()?;
        let builder = self
            .request(Method::GET, "/api/1/search")
            .query(&query.to_query_pairs());
        let files: Option<Vec<Record>> = self.send("/api/1/search", builder).await?.into_data()?;
        Ok(files.unwrap_or_default())
    }

    async fn update_file(&self, request: &UpdateRequest) -> Result<(), ApiError> {
        info!(
            id = request.id,
            stars = ?request.stars,
            add = ?request.add_tags,
            remove = ?request.remove_tags,
            "updating file"
        );
        let builder = self
            .request(Method::POST, "/api/1/update")
            .form(&request.to_form());
        self.send("/api/1/update", builder).await?.into_ack()
    }

    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        let builder = self.request(Method::GET, "/api/1/tags");
        let tags: Option<TagList> = self.send("/api/1/tags", builder).await?.into_data()?;
        Ok(tags.map(TagList::into_tags).unwrap_or_default())
    }

    async fn add_tag(&self, tag: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::GET, "/api/1/addtag")
            .query(&[("tag", tag)]);
        self.send("/api/1/addtag", builder).await?.into_ack()
    }

    async fn delete_tag(&self, tag: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, "/api/1/deletetag")
            .query(&[("tag", tag)]);
        self.send("/api/1/deletetag", builder).await?.into_ack()
    }

    async fn mark_viewed(&self, id: u64) -> Result<(), ApiError> {
        let builder = self
            .request(Method::GET, "/api/1/viewed")
            .query(&[("id", id)]);
        self.send("/api/1/viewed", builder).await?.into_ack()
    }

    async fn content_type(&self, id: u64) -> Result<String, ApiError> {
        let uri = content_uri(id, false);
        debug!(request = %uri, "probing content type");
        let response = self.request(Method::HEAD, &uri).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                code: i64::from(status.as_u16()),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(ApiError::MissingContentType(id))
    }

    async fn status(&self) -> Result<StatusInfo, ApiError> {
        let builder = self.request(Method::GET, "/api/1/status");
        self.send("/api/1/status", builder).await?.into_data()
    }

    async fn delete_file(&self, id: u64) -> Result<(), ApiError> {
        info!(id, "deleting file");
        let builder = self
            .request(Method::DELETE, "/api/1/deletefile")
            .query(&[("id", id)]);
        self.send("/api/1/deletefile", builder).await?.into_ack()
    }
}
