//! Bridges a loader to the presenter

use super::CommentsPresenter;
use crate::loader::{CommentsLoader, LoadTask};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Something a refresh control can ask for fresh comments
pub trait CommentsRefreshDelegate: Send + Sync {
    /// Start a new load
    ///
    /// Returns the task so the caller can cancel it on teardown.
    fn did_request_refresh(&self) -> Box<dyn LoadTask>;
}

/// Runs loads for one `(loader, url)` pair and reports them to a presenter
///
/// Each request issues a fresh load. Earlier loads are not cancelled, so
/// when loads overlap the last completion to arrive decides what is shown.
pub struct CommentsPresentationAdapter<L> {
    loader: L,
    url: Url,
    presenter: Arc<CommentsPresenter>,
}

impl<L: CommentsLoader> CommentsPresentationAdapter<L> {
    /// Bind `loader` and `url` to `presenter`
    pub fn new(loader: L, url: Url, presenter: Arc<CommentsPresenter>) -> Self {
        Self {
            loader,
            url,
            presenter,
        }
    }

    /// The presenter receiving load events
    pub fn presenter(&self) -> &Arc<CommentsPresenter> {
        &self.presenter
    }

    /// Signal loading to the presenter and start a load
    pub fn did_request_comments(&self) -> Box<dyn LoadTask> {
        debug!(url = %self.url, "comments requested");
        self.presenter.did_start_loading();

        let presenter = Arc::clone(&self.presenter);
        self.loader.load(
            &self.url,
            Box::new(move |result| match result {
                Ok(comments) => presenter.did_finish_loading_comments(&comments),
                Err(_) => presenter.did_finish_loading_comments_with_error(),
            }),
        )
    }
}

impl<L: CommentsLoader> CommentsRefreshDelegate for CommentsPresentationAdapter<L> {
    fn did_request_refresh(&self) -> Box<dyn LoadTask> {
        self.did_request_comments()
    }
}
