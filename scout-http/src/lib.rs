//! Minimal HTTP client with browser-like session defaults and safe logging.
//!
//! - Per-request timeout, 15 s when none is given
//! - A single shared cookie store and default `User-Agent`/`Accept` headers
//! - Responses are returned whatever their status; callers decide what a
//!   non-200 means (the prober only wants a 200, the extractor wants 2xx)
//! - No retries: a failed request is reported once and the caller moves on
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), scout_http::HttpError> {
//! let client = scout_http::HttpClient::new()?;
//! let resp = client
//!     .get("https://api.example.com/v1/items", scout_http::RequestOpts::default())
//!     .await?
//!     .error_for_status()?;
//! let items: serde_json::Value = resp.json()?;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response status, body snippets (truncated, trace level) and failures.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode, Url};
use scout_common::ScoutError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SNIPPET_LIMIT: usize = 500;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, content_type={1}, body_snippet: {2}")]
    Decode(String, String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl From<HttpError> for ScoutError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Decode(..) => ScoutError::MalformedResponse(err.to_string()),
            other => ScoutError::Http(other.to_string()),
        }
    }
}

// ==============================
// Request options
// ==============================

/// Per-request options. Without a timeout the client default of 15 s applies.
///
/// ```
/// use scout_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts::timeout(Duration::from_secs(10));
/// assert_eq!(opts.timeout, Some(Duration::from_secs(10)));
/// assert!(RequestOpts::default().timeout.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
}

impl RequestOpts {
    /// Options carrying only a timeout.
    pub fn timeout(dur: Duration) -> Self {
        Self { timeout: Some(dur) }
    }
}

// ==============================
// Response
// ==============================

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Turn a non-2xx status into [`HttpError::Api`].
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.status.is_success() {
            return Ok(self);
        }
        Err(HttpError::Api {
            status: self.status,
            message: snip_body(&self.body),
        })
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice::<T>(&self.body).map_err(|e| {
            let snippet = snip_body(&self.body);
            tracing::warn!(
                url=%self.url,
                serde_line=%e.line(),
                serde_col=%e.column(),
                content_type=?self.content_type,
                body_snippet=%snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(
                e.to_string(),
                self.content_type.clone().unwrap_or_else(|| "-".into()),
                snippet,
            )
        })
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Construct a client with a cookie store and browser-like default headers.
    ///
    /// ```no_run
    /// use scout_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new()?;
    /// # let _ = client;
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new() -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { inner })
    }

    /// GET `url` and read the whole body.
    pub async fn get(&self, url: &str, opts: RequestOpts) -> Result<HttpResponse, HttpError> {
        self.send::<()>(Method::GET, url, None, opts).await
    }

    /// POST a JSON body to `url` and read the whole response.
    pub async fn post_json<B>(
        &self,
        url: &str,
        body: &B,
        opts: RequestOpts,
    ) -> Result<HttpResponse, HttpError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, Some(body), opts).await
    }

    async fn send<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        opts: RequestOpts,
    ) -> Result<HttpResponse, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;

        let mut rb = self.inner.request(method.clone(), url.clone());

        let timeout = opts.timeout.unwrap_or(DEFAULT_TIMEOUT);
        rb = rb.timeout(timeout);

        if let Some(b) = body {
            let bytes = serde_json::to_vec(b).map_err(|e| HttpError::Build(e.to_string()))?;
            rb = rb.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        tracing::debug!(
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            timeout_ms=timeout.as_millis() as u64,
            has_body=%body.is_some(),
            "http.request.start"
        );

        let t0 = Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::debug!(url=%url, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::debug!(url=%url, message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;

        tracing::debug!(
            url=%url,
            %status,
            duration_ms=t0.elapsed().as_millis() as u64,
            body_len=bytes.len(),
            content_type=?content_type,
            "http.response.headers"
        );
        tracing::trace!(
            url=%url,
            body_snippet=%snip_body(&bytes),
            "http.response.body_snippet"
        );

        Ok(HttpResponse {
            url,
            status,
            content_type,
            body: bytes.to_vec(),
        })
    }
}

// ==============================
// Helpers
// ==============================

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_LIMIT {
        let mut cut = SNIPPET_LIMIT;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}
