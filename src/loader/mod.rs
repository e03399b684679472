//! Comment loading
//!
//! [`CommentsLoader`] is the seam between the presentation layer and any
//! source of comments. [`RemoteCommentsLoader`] is the network-backed
//! implementation: one GET per load, response mapped by
//! [`CommentsMapper`](crate::mapper::CommentsMapper), failures collapsed into
//! [`LoadError`].
//!
//! ## Delivery guarantees
//!
//! - A completion is invoked at most once.
//! - Cancelling the returned [`LoadTask`] before the transport responds
//!   suppresses the completion and forwards the cancel to the transport.
//! - Dropping the [`RemoteCommentsLoader`] before the transport responds
//!   suppresses the completion.

use crate::error::LoadError;
use crate::http::{HttpClient, HttpClientTask, HttpResult};
use crate::mapper::CommentsMapper;
use crate::types::Comment;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, warn};
use url::Url;

/// Outcome of a single load
pub type LoadResult = std::result::Result<Vec<Comment>, LoadError>;

/// Callback receiving the outcome of a load
pub type LoadCompletion = Box<dyn FnOnce(LoadResult) + Send + 'static>;

/// Handle to an in-flight load
pub trait LoadTask: Send + Sync {
    /// Cancel the load
    ///
    /// Idempotent. Has no effect once the load has completed.
    fn cancel(&self);
}

impl<T: LoadTask + ?Sized> LoadTask for Arc<T> {
    fn cancel(&self) {
        (**self).cancel()
    }
}

/// Trait for sources of comments
pub trait CommentsLoader: Send + Sync {
    /// Start loading the comments at `url`
    ///
    /// Returns immediately with a cancellable task; `completion` is called
    /// later, at most once.
    fn load(&self, url: &Url, completion: LoadCompletion) -> Box<dyn LoadTask>;
}

impl<T: CommentsLoader + ?Sized> CommentsLoader for Arc<T> {
    fn load(&self, url: &Url, completion: LoadCompletion) -> Box<dyn LoadTask> {
        (**self).load(url, completion)
    }
}

/// Loads comments from a remote endpoint through an [`HttpClient`]
pub struct RemoteCommentsLoader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    client: Arc<dyn HttpClient>,
}

impl RemoteCommentsLoader {
    /// Create a loader that issues its requests through `client`
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            inner: Arc::new(LoaderInner { client }),
        }
    }

    fn map(result: HttpResult, url: &Url) -> LoadResult {
        match result {
            Ok(response) => match CommentsMapper::map(&response.body, response.status) {
                Ok(items) => {
                    debug!(url = %url, count = items.len(), "comments loaded");
                    Ok(items.into_iter().map(Comment::from).collect())
                }
                Err(e) => {
                    warn!(url = %url, status = response.status, error = %e, "invalid comments response");
                    Err(LoadError::InvalidData)
                }
            },
            Err(e) => {
                warn!(url = %url, error = %e, "comments request failed");
                Err(LoadError::Connectivity)
            }
        }
    }
}

impl CommentsLoader for RemoteCommentsLoader {
    fn load(&self, url: &Url, completion: LoadCompletion) -> Box<dyn LoadTask> {
        debug!(url = %url, "loading comments");

        let task = Arc::new(RemoteLoadTask::new(completion));
        let pending = Arc::clone(&task);
        let loader: Weak<LoaderInner> = Arc::downgrade(&self.inner);
        let request_url = url.clone();

        let transport = self.inner.client.get(
            url,
            Box::new(move |result| {
                if loader.upgrade().is_none() {
                    debug!(url = %request_url, "loader released, dropping response");
                    pending.discard();
                    return;
                }
                pending.complete(Self::map(result, &request_url));
            }),
        );
        task.attach(transport);

        Box::new(task)
    }
}

/// Ties a load completion to the transport task serving it
struct RemoteLoadTask {
    completion: Mutex<Option<LoadCompletion>>,
    transport: Mutex<Option<Box<dyn HttpClientTask>>>,
}

impl RemoteLoadTask {
    fn new(completion: LoadCompletion) -> Self {
        Self {
            completion: Mutex::new(Some(completion)),
            transport: Mutex::new(None),
        }
    }

    /// Keep the transport handle, unless the load already finished
    fn attach(&self, transport: Box<dyn HttpClientTask>) {
        let completion = lock(&self.completion);
        if completion.is_some() {
            *lock(&self.transport) = Some(transport);
        }
    }

    fn complete(&self, result: LoadResult) {
        let completion = lock(&self.completion).take();
        lock(&self.transport).take();

        // Invoked outside the lock so the completion may cancel this task
        if let Some(completion) = completion {
            completion(result);
        }
    }

    /// Drop the completion without calling it
    fn discard(&self) {
        lock(&self.completion).take();
        lock(&self.transport).take();
    }
}

impl LoadTask for RemoteLoadTask {
    fn cancel(&self) {
        let transport = lock(&self.transport).take();
        lock(&self.completion).take();

        if let Some(transport) = transport {
            debug!("cancelling comments request");
            transport.cancel();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Load comments and await the outcome
///
/// Bridges the callback contract to a future. Resolves to `None` when the
/// completion is never delivered, e.g. because the loader was dropped.
///
/// When `loader` redelivers on a [`MainQueue`](crate::dispatch::MainQueue),
/// the queue must be drained concurrently for this future to resolve.
///
/// # Examples
///
/// ```no_run
/// use feed_comments::config::HttpConfig;
/// use feed_comments::http::ReqwestHttpClient;
/// use feed_comments::loader::{RemoteCommentsLoader, load_comments};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestHttpClient::new(&HttpConfig::default())?;
/// let loader = RemoteCommentsLoader::new(Arc::new(client));
/// let url = "https://example.com/image/1/comments".parse()?;
///
/// match load_comments(&loader, &url).await {
///     Some(Ok(comments)) => println!("{} comments", comments.len()),
///     Some(Err(e)) => println!("failed: {}", e),
///     None => println!("no result"),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn load_comments<L>(loader: &L, url: &Url) -> Option<LoadResult>
where
    L: CommentsLoader + ?Sized,
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    let _task = loader.load(
        url,
        Box::new(move |result| {
            tx.send(result).ok();
        }),
    );
    rx.await.ok()
}
