use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tokio::time::sleep;

use crate::{
    signer::AuthHeaders, ClientOptions, HttpMethod, Orders, Result, SiteflowConfig, SiteflowError,
};

/// Typed "no request body" for [`SiteflowClient::create_request`].
pub const NO_BODY: Option<&()> = None;

#[derive(Clone)]
/// Signed HTTP client for the Siteflow API.
///
/// Each call signs every attempt with a fresh timestamp, retries according to
/// [`ClientOptions`] and returns either the decoded JSON body or one error.
///
/// Credentials are fixed at construction. Calls on one client (or its clones)
/// may run concurrently; they share nothing mutable.
pub struct SiteflowClient {
    http: reqwest::Client,
    config: SiteflowConfig,
    options: ClientOptions,
}

impl fmt::Debug for SiteflowClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteflowClient")
            .field("config", &self.config)
            .field("options", &self.options)
            .finish()
    }
}

/// One try of a logical call. Lives only inside the retry loop.
struct Attempt<'a> {
    index: usize,
    method: HttpMethod,
    path: &'a str,
    headers: AuthHeaders,
}

impl<'a> Attempt<'a> {
    /// Signs against the current clock; a retry never reuses an old signature.
    fn start(
        config: &SiteflowConfig,
        method: HttpMethod,
        path: &'a str,
        options: &ClientOptions,
        index: usize,
    ) -> Self {
        Self {
            index,
            method,
            path,
            headers: AuthHeaders::build(config, method, path, &Utc::now(), options),
        }
    }
}

impl SiteflowClient {
    /// Creates a client with default [`ClientOptions`].
    pub fn new(config: SiteflowConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from `SITEFLOW_*` environment variables.
    ///
    /// See [`SiteflowConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        SiteflowConfig::from_env().map(Self::new)
    }

    /// Applies default options used by every call that does not pass its own.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the underlying `reqwest` client (proxies, TLS roots, pooling).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &SiteflowConfig {
        &self.config
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Order endpoints.
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Executes one logical call with the client's default options.
    ///
    /// `path` must start with `/` and is appended verbatim to the base URL.
    /// Pass [`NO_BODY`] (or a body serializing to `null`) to send no payload.
    pub async fn create_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<JsonValue>
    where
        B: Serialize + ?Sized,
    {
        self.create_request_with(method, path, body, &self.options)
            .await
    }

    /// Executes one logical call with per-call options.
    ///
    /// Non-2xx responses, transport failures and undecodable bodies are attempt
    /// failures. Only the last one is returned, after a `400` carrying an
    /// `error` object has been unwrapped to [`SiteflowError::Application`].
    pub async fn create_request_with<B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        options: &ClientOptions,
    ) -> Result<JsonValue>
    where
        B: Serialize + ?Sized,
    {
        if !path.starts_with('/') {
            return Err(SiteflowError::InvalidPath(path.to_owned()));
        }
        let body = encode_body(body)?;

        let mut index = 0usize;
        loop {
            let attempt = Attempt::start(&self.config, method, path, options, index);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                method = %attempt.method,
                path = attempt.path,
                attempt = attempt.index,
                "sending request"
            );

            let err = match self.send_attempt(&attempt, body.as_deref(), options).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            #[cfg(feature = "tracing")]
            tracing::warn!(
                method = %attempt.method,
                path = attempt.path,
                attempt = attempt.index,
                error = %err,
                "request attempt failed"
            );

            if attempt.index < options.retries && options.retry_condition.should_retry(&err) {
                self.wait_before_retry(options.retry_delay_ms).await;
                index += 1;
                continue;
            }

            return Err(err.normalize());
        }
    }

    async fn send_attempt(
        &self,
        attempt: &Attempt<'_>,
        body: Option<&[u8]>,
        options: &ClientOptions,
    ) -> Result<JsonValue> {
        let mut request = self
            .http
            .request(attempt.method.into(), self.config.url_for(attempt.path));
        for (name, value) in attempt.headers.iter() {
            request = request.header(name, value);
        }
        if let Some(timeout_ms) = options.timeout_ms {
            request = request.timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await.map_err(SiteflowError::Transport)?;
        let status = response.status();
        let body = response.text().await;

        if !status.is_success() {
            // The status is known even when the error body cannot be read.
            return Err(SiteflowError::Http {
                status: status.as_u16(),
                body: body.unwrap_or_default(),
            });
        }
        let body = body.map_err(SiteflowError::Transport)?;

        serde_json::from_str::<JsonValue>(&body).map_err(|err| {
            SiteflowError::Decode(format!("invalid response JSON: {err}; body: {body}"))
        })
    }

    /// Waits a fixed delay before the next attempt. No backoff, no jitter.
    async fn wait_before_retry(&self, delay_ms: u64) {
        #[cfg(feature = "tracing")]
        tracing::debug!("retrying request after {} ms", delay_ms);

        sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// Serializes the request body; absent or `null` bodies produce no payload.
fn encode_body<B>(body: Option<&B>) -> Result<Option<Vec<u8>>>
where
    B: Serialize + ?Sized,
{
    let Some(body) = body else {
        return Ok(None);
    };
    let bytes = serde_json::to_vec(body).map_err(|err| SiteflowError::Encode(err.to_string()))?;
    if bytes == b"null" {
        return Ok(None);
    }
    Ok(Some(bytes))
}
