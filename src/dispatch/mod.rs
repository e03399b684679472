//! Redelivery of load completions onto a UI-owned execution context
//!
//! Transport callbacks arrive on whatever thread the HTTP client uses. The
//! presentation layer expects to be driven from a single thread, so the
//! [`MainQueueDispatchDecorator`] wraps any [`CommentsLoader`] and hands each
//! completion to an [`Executor`]:
//!
//! - already on the executor's context: the completion runs inline
//! - anywhere else: the completion is posted and runs later, in FIFO order
//!   with everything else posted to that executor
//!
//! Two executors are provided:
//!
//! - [`MainQueue`]: a single-threaded job queue drained by a [`MainQueueRunner`]
//! - [`ImmediateExecutor`]: runs every job inline, for tests and headless use

mod main_queue;

pub use main_queue::{MainQueue, MainQueueRunner};

use crate::loader::{CommentsLoader, LoadCompletion, LoadTask};
use std::sync::Arc;
use url::Url;

/// A unit of work posted to an [`Executor`]
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// An execution context that jobs can be posted to
pub trait Executor: Send + Sync {
    /// Whether the calling code already runs on this executor's context
    fn is_current(&self) -> bool;

    /// Post `job` to run later on this executor's context
    fn execute(&self, job: Job);
}

impl<T: Executor + ?Sized> Executor for Arc<T> {
    fn is_current(&self) -> bool {
        (**self).is_current()
    }

    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

/// Run `job` on `executor`'s context, inline when already there
pub fn dispatch<E>(executor: &E, job: Job)
where
    E: Executor + ?Sized,
{
    if executor.is_current() {
        job();
    } else {
        executor.execute(job);
    }
}

/// Executor that runs every job immediately on the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateExecutor;

impl Executor for ImmediateExecutor {
    fn is_current(&self) -> bool {
        true
    }

    fn execute(&self, job: Job) {
        job();
    }
}

/// Loader decorator that delivers completions through an [`Executor`]
///
/// Results are passed through untouched; only the thread they arrive on
/// changes. The decoratee's task is returned as-is, so cancelling it still
/// suppresses delivery.
///
/// # Examples
///
/// ```
/// use feed_comments::dispatch::{MainQueue, MainQueueDispatchDecorator};
/// use feed_comments::loader::{CommentsLoader, LoadCompletion, LoadTask};
/// use url::Url;
///
/// struct EmptyLoader;
/// struct Done;
///
/// impl LoadTask for Done {
///     fn cancel(&self) {}
/// }
///
/// impl CommentsLoader for EmptyLoader {
///     fn load(&self, _url: &Url, completion: LoadCompletion) -> Box<dyn LoadTask> {
///         std::thread::spawn(move || completion(Ok(vec![])));
///         Box::new(Done)
///     }
/// }
///
/// let (queue, mut runner) = MainQueue::new();
/// let loader = MainQueueDispatchDecorator::new(EmptyLoader, queue);
/// let url = Url::parse("https://example.com/comments").unwrap();
///
/// let _task = loader.load(&url, Box::new(|result| {
///     assert!(result.unwrap().is_empty());
/// }));
///
/// // The completion arrived on another thread, so it waits on the queue
/// while runner.run_pending() == 0 {
///     std::thread::yield_now();
/// }
/// ```
pub struct MainQueueDispatchDecorator<L, E> {
    decoratee: L,
    executor: E,
}

impl<L, E> MainQueueDispatchDecorator<L, E> {
    /// Wrap `decoratee` so its completions are delivered through `executor`
    pub fn new(decoratee: L, executor: E) -> Self {
        Self {
            decoratee,
            executor,
        }
    }
}

impl<L, E> CommentsLoader for MainQueueDispatchDecorator<L, E>
where
    L: CommentsLoader,
    E: Executor + Clone + 'static,
{
    fn load(&self, url: &Url, completion: LoadCompletion) -> Box<dyn LoadTask> {
        let executor = self.executor.clone();
        self.decoratee.load(
            url,
            Box::new(move |result| {
                dispatch(&executor, Box::new(move || completion(result)));
            }),
        )
    }
}
