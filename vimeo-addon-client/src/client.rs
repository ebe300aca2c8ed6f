//! Vimeo HTTP Client

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};
use url::Url;

use super::error::VimeoError;
use super::response::decode;
use super::types::{Category, Channel, Paginated, PlayerConfig, Video};

pub const DEFAULT_API_URL: &str = "https://api.vimeo.com";
pub const DEFAULT_PLAYER_URL: &str = "https://player.vimeo.com";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Render a scalar JSON value as a query/form value. `null` has no rendering.
#[must_use]
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Flatten a JSON object into key/value pairs. Arrays expand to repeated
/// keys, nulls are dropped, non-objects yield nothing.
#[must_use]
pub fn flatten_pairs(value: &Value) -> Vec<(String, String)> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter_map(value_to_string)
                    .map(|item| (key.clone(), item)),
            ),
            other => {
                if let Some(item) = value_to_string(other) {
                    pairs.push((key.clone(), item));
                }
            }
        }
    }
    pairs
}

/// Serialize a body as `application/x-www-form-urlencoded`
#[must_use]
pub fn encode_form(body: &Value) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in flatten_pairs(body) {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

/// Serialize a request body according to the `Content-Type` header
fn encode_body(headers: &HeaderMap, body: &Value) -> Result<String, VimeoError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match (content_type, body) {
        (JSON_CONTENT_TYPE, body) => Ok(serde_json::to_string(body)?),
        (FORM_CONTENT_TYPE, body) => Ok(encode_form(body)),
        (_, Value::String(raw)) => Ok(raw.clone()),
        (_, body) => Ok(serde_json::to_string(body)?),
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    /// JSON body with a matching `Content-Type`
    #[must_use]
    pub fn json(body: Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Self {
            headers,
            body: Some(body),
        }
    }

    /// Form body with a matching `Content-Type`
    #[must_use]
    pub fn form(body: Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        Self {
            headers,
            body: Some(body),
        }
    }
}

/// Vimeo HTTP Client
///
/// Holds the API origin, the player origin and an optional bearer token.
/// Read-only once built, so it can be shared freely between requests.
#[derive(Debug, Clone)]
pub struct VimeoClient {
    api_url: Url,
    player_url: Url,
    token: Option<String>,
    debug: bool,
    client: Client,
}

impl VimeoClient {
    /// Create a new client with default timeouts
    pub fn new(api_url: &str) -> Result<Self, VimeoError> {
        Self::with_timeouts(api_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    /// Create a new client with explicit connect and request timeouts
    pub fn with_timeouts(
        api_url: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, VimeoError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_url: Url::parse(api_url)?,
            player_url: Url::parse(DEFAULT_PLAYER_URL)?,
            token: None,
            debug: false,
            client,
        })
    }

    /// Set the bearer token sent with every request
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Override the player origin used for player configuration lookups
    pub fn set_player_url(&mut self, player_url: &str) -> Result<(), VimeoError> {
        self.player_url = Url::parse(player_url)?;
        Ok(())
    }

    /// Log outgoing requests and upstream errors
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Get the API origin
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Check if client has token
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// API URL for `segments`, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, VimeoError> {
        Self::with_segments(&self.api_url, segments)
    }

    fn with_segments(origin: &Url, segments: &[&str]) -> Result<Url, VimeoError> {
        let mut url = origin.clone();
        url.path_segments_mut()
            .map_err(|()| VimeoError::InvalidConfig(format!("{origin} cannot be a base URL")))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    /// Build the target URL.
    ///
    /// An absolute `http(s)` path is used as-is (its own origin and path);
    /// anything else replaces the path of the API origin. Query pairs are
    /// appended in map order.
    pub fn build_url(&self, path: &str, query: &Value) -> Result<Url, VimeoError> {
        let mut url = if path.starts_with("http") {
            Url::parse(path)?
        } else {
            let mut url = self.api_url.clone();
            url.set_path(path);
            url
        };

        let pairs = flatten_pairs(query);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Issue a request and decode the response
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, VimeoError> {
        let url = self.build_url(path, query)?;
        let mut headers = options.headers;

        let body = match options.body {
            Some(ref body) => Some(encode_body(&headers, body)?),
            None => None,
        };

        if self.debug {
            info!(method = %method, url = %url, headers = ?headers, "API request");
        }

        if let Some(ref token) = self.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let result = decode(response).await;

        if self.debug {
            if let Err(VimeoError::Upstream { status, payload }) = &result {
                warn!(status = %status, payload = %payload, "API error");
            }
        }

        result
    }

    pub async fn get(&self, path: &str, query: &Value) -> Result<Option<Value>, VimeoError> {
        self.request(Method::GET, path, query, RequestOptions::default())
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        query: &Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, VimeoError> {
        self.request(Method::POST, path, query, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        query: &Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, VimeoError> {
        self.request(Method::PUT, path, query, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        query: &Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, VimeoError> {
        self.request(Method::DELETE, path, query, options).await
    }

    /// GET and validate the body against `T`. An empty (204) body is a parse
    /// error here since every typed endpoint returns a document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Value,
    ) -> Result<T, VimeoError> {
        let body = self
            .get(path, query)
            .await?
            .ok_or_else(|| VimeoError::Parse(format!("Empty response body for {path}")))?;
        serde_json::from_value(body).map_err(Into::into)
    }

    // ------------------------------------------------------------------
    // Typed endpoints
    // ------------------------------------------------------------------

    /// List categories
    pub async fn categories(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Category>, VimeoError> {
        let query = serde_json::json!({ "per_page": per_page, "page": page });
        self.get_json("categories", &query).await
    }

    /// List channels within a category
    pub async fn category_channels(
        &self,
        category: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Channel>, VimeoError> {
        let url = self.endpoint(&["categories", category, "channels"])?;
        let query = serde_json::json!({ "per_page": per_page, "page": page });
        self.get_json(url.as_str(), &query).await
    }

    /// List channels. `filter` fields (e.g. `sort`) are passed through as
    /// query parameters; paging parameters always win.
    pub async fn channels(
        &self,
        filter: &Map<String, Value>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Channel>, VimeoError> {
        let mut query = filter.clone();
        query.insert("per_page".to_string(), Value::from(per_page));
        query.insert("page".to_string(), Value::from(page));
        self.get_json("channels", &Value::Object(query)).await
    }

    /// Search channels by free text
    pub async fn search_channels(
        &self,
        text: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Channel>, VimeoError> {
        let query = serde_json::json!({ "query": text, "per_page": per_page, "page": page });
        self.get_json("channels", &query).await
    }

    /// Get a single channel
    pub async fn channel(&self, id: &str) -> Result<Channel, VimeoError> {
        let url = self.endpoint(&["channels", id])?;
        self.get_json(url.as_str(), &Value::Null).await
    }

    /// List videos of a channel
    pub async fn channel_videos(
        &self,
        channel: &str,
        sort: &str,
        direction: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Video>, VimeoError> {
        let url = self.endpoint(&["channels", channel, "videos"])?;
        let query = serde_json::json!({
            "sort": sort,
            "direction": direction,
            "per_page": per_page,
            "page": page,
        });
        self.get_json(url.as_str(), &query).await
    }

    /// Get a single video
    pub async fn video(&self, id: &str) -> Result<Video, VimeoError> {
        let url = self.endpoint(&["videos", id])?;
        self.get_json(url.as_str(), &Value::Null).await
    }

    /// Get the player configuration of a video (absolute URL on the player origin)
    pub async fn player_config(&self, id: &str) -> Result<PlayerConfig, VimeoError> {
        let url = Self::with_segments(&self.player_url, &["video", id, "config"])?;
        self.get_json(url.as_str(), &Value::Null).await
    }
}
