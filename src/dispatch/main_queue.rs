//! Single-threaded job queue standing in for a UI main thread

use super::{Executor, Job};
use std::marker::PhantomData;
use std::thread::{self, ThreadId};
use tokio::sync::mpsc;
use tracing::warn;

/// Handle for posting jobs to a main queue
///
/// The queue is bound to the thread that created it; [`is_current`] reports
/// whether the caller runs on that thread. Handles are cheap to clone and can
/// be sent to any thread.
///
/// [`is_current`]: Executor::is_current
#[derive(Clone, Debug)]
pub struct MainQueue {
    sender: mpsc::UnboundedSender<Job>,
    owner: ThreadId,
}

/// Drains jobs posted to a [`MainQueue`]
///
/// Pinned to the owning thread: it is deliberately `!Send`, so jobs can only
/// ever run where [`MainQueue::is_current`](Executor::is_current) is true.
pub struct MainQueueRunner {
    receiver: mpsc::UnboundedReceiver<Job>,
    _not_send: PhantomData<*const ()>,
}

impl MainQueue {
    /// Create a queue bound to the current thread
    ///
    /// Returns the posting handle and the runner that must be driven from
    /// this same thread.
    #[must_use]
    pub fn new() -> (Self, MainQueueRunner) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue = Self {
            sender,
            owner: thread::current().id(),
        };
        let runner = MainQueueRunner {
            receiver,
            _not_send: PhantomData,
        };
        (queue, runner)
    }
}

impl Executor for MainQueue {
    fn is_current(&self) -> bool {
        thread::current().id() == self.owner
    }

    fn execute(&self, job: Job) {
        if self.sender.send(job).is_err() {
            warn!("main queue runner dropped, discarding job");
        }
    }
}

impl MainQueueRunner {
    /// Run every job that is already queued, without waiting
    ///
    /// Returns the number of jobs run. Jobs posted while draining are run in
    /// the same call.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait for the next job and run it
    ///
    /// Returns `false` once every [`MainQueue`] handle is dropped and the
    /// queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run jobs until every [`MainQueue`] handle is dropped
    pub async fn run(mut self) {
        while self.run_next().await {}
    }
}
