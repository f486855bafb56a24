//! HTTP client for backend print calls
//!
//! Every response passes through a chain of [`ResponseInterceptor`]s before
//! its body is read, so cross-cutting checks (session expiry) live in one
//! place instead of at each call site.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{PrintError, PrintResult};

/// Inspects each response status before the body is consumed
pub trait ResponseInterceptor: Send + Sync {
    /// Return an error to abort the call
    fn inspect(&self, status: StatusCode) -> PrintResult<()>;
}

/// Maps 401/403 to [`PrintError::SessionExpired`] and fires a callback
///
/// The callback is where the UI shell logs the user out.
pub struct SessionExpiryInterceptor {
    on_expired: Option<Box<dyn Fn() + Send + Sync>>,
}

impl SessionExpiryInterceptor {
    pub fn new() -> Self {
        Self { on_expired: None }
    }

    pub fn with_callback(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            on_expired: Some(Box::new(callback)),
        }
    }
}

impl Default for SessionExpiryInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseInterceptor for SessionExpiryInterceptor {
    fn inspect(&self, status: StatusCode) -> PrintResult<()> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "Session rejected by backend");
            if let Some(callback) = &self.on_expired {
                callback();
            }
            return Err(PrintError::SessionExpired);
        }
        Ok(())
    }
}

/// Backend API client
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    /// Create a client for a backend base URL (e.g. "http://10.0.0.2:3100")
    ///
    /// A [`SessionExpiryInterceptor`] is installed by default.
    pub fn new(base_url: impl Into<String>) -> PrintResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> PrintResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PrintError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interceptors: vec![Arc::new(SessionExpiryInterceptor::new())],
        })
    }

    /// Replace the interceptor chain
    pub fn with_interceptors(mut self, interceptors: Vec<Arc<dyn ResponseInterceptor>>) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// Append an interceptor to the chain
    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and decode a JSON reply
    ///
    /// The reply is decoded whatever the status: the print proxy reports
    /// failures as a structured body rather than a bare status code.
    #[instrument(skip(self, body), fields(base = %self.base_url))]
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> PrintResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                PrintError::Timeout(format!("{}: {}", url, e))
            } else {
                PrintError::BackendUnreachable(format!("{}: {}", url, e))
            }
        })?;

        let status = response.status();
        debug!(%status, "Backend responded");

        for interceptor in &self.interceptors {
            interceptor.inspect(status)?;
        }

        response.json::<R>().await.map_err(|e| {
            PrintError::BackendUnreachable(format!("Unexpected response ({}) from {}: {}", status, url, e))
        })
    }
}
