//! `reqwest`-backed HTTP client

use super::{HttpClient, HttpClientTask, HttpCompletion, HttpResult};
use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::types::HttpResponse;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// HTTP client that runs requests on a tokio runtime
///
/// Each `get` spawns one task on the runtime. The task races the request
/// against a [`CancellationToken`]; once cancelled, the completion is dropped
/// without being called.
///
/// # Examples
///
/// ```no_run
/// use feed_comments::config::HttpConfig;
/// use feed_comments::http::{HttpClient, ReqwestHttpClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestHttpClient::new(&HttpConfig::default())?;
/// let url = "https://example.com/image/1/comments".parse()?;
/// let _task = client.get(&url, Box::new(|result| {
///     println!("status: {:?}", result.map(|r| r.status));
/// }));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    runtime: Handle,
}

impl ReqwestHttpClient {
    /// Create a client bound to the tokio runtime of the calling context
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a tokio runtime or if the
    /// underlying `reqwest` client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error::Config {
            message: format!("ReqwestHttpClient requires a tokio runtime: {}", e),
            key: None,
        })?;
        Self::with_runtime(config, runtime)
    }

    /// Create a client that spawns its requests on `runtime`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest` client cannot be built.
    pub fn with_runtime(config: &HttpConfig, runtime: Handle) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, runtime })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &Url, completion: HttpCompletion) -> Box<dyn HttpClientTask> {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let request = self.client.get(url.clone());
        let url = url.clone();

        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    debug!(url = %url, "request cancelled before completion");
                }
                result = fetch(request) => {
                    completion(result);
                }
            }
        });

        Box::new(ReqwestTask { token })
    }
}

async fn fetch(request: reqwest::RequestBuilder) -> HttpResult {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;

    Ok(HttpResponse::new(status, body.to_vec()))
}

struct ReqwestTask {
    token: CancellationToken,
}

impl HttpClientTask for ReqwestTask {
    fn cancel(&self) {
        self.token.cancel();
    }
}
