//! Assembles the comments pipeline for one screen

use crate::config::LocalizationConfig;
use crate::dispatch::{Executor, MainQueueDispatchDecorator};
use crate::loader::CommentsLoader;
use crate::presentation::time::Clock;
use crate::presentation::{
    CommentsPresentationAdapter, CommentsPresenter, CommentsView, ErrorView, LoadingView,
    WeakRefVirtualProxy,
};
use std::sync::Arc;
use url::Url;

/// Adapter type produced by [`CommentsUIComposer::compose`]
pub type ComposedComments<L, E> = CommentsPresentationAdapter<MainQueueDispatchDecorator<L, E>>;

/// Wires loader, dispatch, presenter and view together
pub struct CommentsUIComposer;

impl CommentsUIComposer {
    /// Build the pipeline for the comments at `url`
    ///
    /// Completions from `loader` are redelivered through `executor` before
    /// reaching the presenter. The presenter talks to `view` through a
    /// [`WeakRefVirtualProxy`], so the screen keeps sole ownership of it.
    ///
    /// # Arguments
    ///
    /// * `loader` - Source of comments
    /// * `url` - Comments endpoint for the item on screen
    /// * `executor` - Context view updates must run on
    /// * `view` - Screen implementing all three view traits
    /// * `localization` - Strings for the title and error message
    /// * `clock` - Reference time for relative timestamps
    ///
    /// # Examples
    ///
    /// ```
    /// use feed_comments::composer::CommentsUIComposer;
    /// use feed_comments::config::LocalizationConfig;
    /// use feed_comments::dispatch::ImmediateExecutor;
    /// use feed_comments::loader::{CommentsLoader, LoadCompletion, LoadTask};
    /// use feed_comments::presentation::time::SystemClock;
    /// use feed_comments::presentation::{
    ///     CommentsView, CommentsViewModel, ErrorView, ErrorViewModel, LoadingView,
    ///     LoadingViewModel,
    /// };
    /// use std::sync::Arc;
    /// use url::Url;
    ///
    /// struct Screen;
    /// impl CommentsView for Screen {
    ///     fn display(&self, vm: CommentsViewModel) {
    ///         assert!(vm.comments.is_empty());
    ///     }
    /// }
    /// impl LoadingView for Screen {
    ///     fn display(&self, _vm: LoadingViewModel) {}
    /// }
    /// impl ErrorView for Screen {
    ///     fn display(&self, _vm: ErrorViewModel) {}
    /// }
    ///
    /// struct EmptyLoader;
    /// struct Done;
    /// impl LoadTask for Done {
    ///     fn cancel(&self) {}
    /// }
    /// impl CommentsLoader for EmptyLoader {
    ///     fn load(&self, _url: &Url, completion: LoadCompletion) -> Box<dyn LoadTask> {
    ///         completion(Ok(vec![]));
    ///         Box::new(Done)
    ///     }
    /// }
    ///
    /// let screen = Arc::new(Screen);
    /// let comments = CommentsUIComposer::compose(
    ///     EmptyLoader,
    ///     Url::parse("https://example.com/image/1/comments").unwrap(),
    ///     ImmediateExecutor,
    ///     &screen,
    ///     LocalizationConfig::default(),
    ///     Arc::new(SystemClock),
    /// );
    ///
    /// assert_eq!(comments.presenter().title(), "Comments");
    /// let _task = comments.did_request_comments();
    /// ```
    pub fn compose<L, E, V>(
        loader: L,
        url: Url,
        executor: E,
        view: &Arc<V>,
        localization: LocalizationConfig,
        clock: Arc<dyn Clock>,
    ) -> ComposedComments<L, E>
    where
        L: CommentsLoader,
        E: Executor + Clone + 'static,
        V: CommentsView + LoadingView + ErrorView + 'static,
    {
        let proxy = Arc::new(WeakRefVirtualProxy::new(view));
        let presenter = CommentsPresenter::new(
            proxy.clone(),
            proxy.clone(),
            proxy,
            localization,
        )
        .with_clock(clock);

        CommentsPresentationAdapter::new(
            MainQueueDispatchDecorator::new(loader, executor),
            url,
            Arc::new(presenter),
        )
    }
}
