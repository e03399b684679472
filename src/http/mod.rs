//! HTTP transport abstraction
//!
//! The loader never talks to the network directly. It goes through the
//! [`HttpClient`] trait, which issues a single GET and reports back through a
//! completion callback, returning a cancellable [`HttpClientTask`] handle.
//!
//! - [`ReqwestHttpClient`]: production client backed by `reqwest` on a tokio runtime
//!
//! Implementations must be safe for concurrent use; completions may be
//! invoked on any thread.

mod reqwest_client;

pub use reqwest_client::ReqwestHttpClient;

use crate::error::HttpClientError;
use crate::types::HttpResponse;
use std::sync::Arc;
use url::Url;

/// Outcome of a single HTTP request
pub type HttpResult = std::result::Result<HttpResponse, HttpClientError>;

/// Callback receiving the outcome of an HTTP request
pub type HttpCompletion = Box<dyn FnOnce(HttpResult) + Send + 'static>;

/// Handle to an in-flight HTTP request
pub trait HttpClientTask: Send + Sync {
    /// Request cancellation of the underlying transport operation
    ///
    /// Best effort: the request may still finish, but a cancelled
    /// [`ReqwestHttpClient`] request never invokes its completion.
    fn cancel(&self);
}

/// Trait for HTTP transports
pub trait HttpClient: Send + Sync {
    /// Issue a GET request for `url`
    ///
    /// Returns immediately; `completion` is invoked at most once with either
    /// the response (any status code) or a transport error.
    fn get(&self, url: &Url, completion: HttpCompletion) -> Box<dyn HttpClientTask>;
}

impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    fn get(&self, url: &Url, completion: HttpCompletion) -> Box<dyn HttpClientTask> {
        (**self).get(url, completion)
    }
}
