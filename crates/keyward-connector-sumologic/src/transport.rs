//! Authenticated JSON transport.
//!
//! Every call returns a [`RateLimited`] outcome: the rate-limit descriptor of
//! the response travels next to the result, whether the call succeeded or
//! not.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use keyward_connector::annotations::RateLimitDescription;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::config::SumoLogicCredentials;
use crate::models::ErrorResponse;
use crate::rate_limit;
use crate::{SumoLogicError, SumoLogicResult};

const APPLICATION_JSON: &str = "application/json";

/// Result of a call plus the rate-limit data of its response.
///
/// `rate_limit` is `None` only when no HTTP response was received.
#[derive(Debug)]
pub struct RateLimited<T> {
    pub rate_limit: Option<RateLimitDescription>,
    pub result: SumoLogicResult<T>,
}

impl<T> RateLimited<T> {
    pub fn new(rate_limit: Option<RateLimitDescription>, result: SumoLogicResult<T>) -> Self {
        Self { rate_limit, result }
    }

    /// A successful outcome.
    pub fn ok(rate_limit: Option<RateLimitDescription>, value: T) -> Self {
        Self::new(rate_limit, Ok(value))
    }

    /// A failure that happened before any response arrived.
    pub fn failed(error: SumoLogicError) -> Self {
        Self::new(None, Err(error))
    }

    /// Transforms the successful value, keeping the rate-limit data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RateLimited<U> {
        RateLimited {
            rate_limit: self.rate_limit,
            result: self.result.map(f),
        }
    }

    /// Wraps an error with the name of the operation.
    #[must_use]
    pub fn context(self, operation: &'static str) -> Self {
        Self {
            rate_limit: self.rate_limit,
            result: self.result.map_err(|e| e.context(operation)),
        }
    }

    pub fn into_parts(self) -> (Option<RateLimitDescription>, SumoLogicResult<T>) {
        (self.rate_limit, self.result)
    }
}

/// Sends JSON requests with basic authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    authorization: HeaderValue,
    cancellation: CancellationToken,
}

impl HttpTransport {
    /// Creates a transport authenticating with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot form a header value.
    pub fn new(http: reqwest::Client, credentials: &SumoLogicCredentials) -> SumoLogicResult<Self> {
        let encoded = STANDARD.encode(format!(
            "{}:{}",
            credentials.access_id,
            credentials.access_key.expose_secret()
        ));
        let mut authorization = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| SumoLogicError::Config(format!("Invalid credentials: {e}")))?;
        authorization.set_sensitive(true);

        Ok(Self {
            http,
            authorization,
            cancellation: CancellationToken::new(),
        })
    }

    /// Aborts in-flight requests when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Sends a request and decodes a JSON response body.
    pub async fn execute_json<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> RateLimited<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let RateLimited { rate_limit, result } = self.execute(method, url, body).await;
        let result = result.and_then(|text| serde_json::from_str(&text).map_err(Into::into));
        RateLimited::new(rate_limit, result)
    }

    /// Sends a request and discards the response body.
    pub async fn execute_empty<B>(&self, method: Method, url: Url, body: Option<&B>) -> RateLimited<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body).await.map(|_| ())
    }

    async fn execute<B>(&self, method: Method, url: Url, body: Option<&B>) -> RateLimited<String>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = %method, url = %url, "Making request");

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON);

        if let Some(body) = body {
            match serde_json::to_vec(body) {
                Ok(bytes) => request = request.body(bytes),
                Err(e) => return RateLimited::failed(e.into()),
            }
        }

        let response = tokio::select! {
            biased;
            () = self.cancellation.cancelled() => return RateLimited::failed(SumoLogicError::Cancelled),
            response = request.send() => response,
        };
        let response = match response {
            Ok(response) => response,
            Err(e) => return RateLimited::failed(e.into()),
        };

        let status = response.status();
        let rate_limit = Some(rate_limit::extract(status, response.headers(), Utc::now()));

        let text = tokio::select! {
            biased;
            () = self.cancellation.cancelled() => {
                return RateLimited::new(rate_limit, Err(SumoLogicError::Cancelled));
            }
            text = response.text() => text,
        };
        let text = match text {
            Ok(text) => text,
            Err(e) => return RateLimited::new(rate_limit, Err(e.into())),
        };

        if !status.is_success() {
            debug!(status = %status, "Request failed");
            return RateLimited::new(rate_limit, Err(api_error(status, text)));
        }

        RateLimited::ok(rate_limit, text)
    }
}

/// Decodes an error body, falling back to the raw text.
fn api_error(status: StatusCode, body: String) -> SumoLogicError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => SumoLogicError::Api {
            status: status.as_u16(),
            code: error.code,
            message: error.message,
            target: error.target,
        },
        Err(_) => SumoLogicError::Api {
            status: status.as_u16(),
            code: status.to_string(),
            message: body,
            target: None,
        },
    }
}
