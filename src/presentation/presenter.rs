//! Maps load lifecycle events to view models

use super::time::{Clock, EnglishRelativeTimeFormatter, RelativeTimeFormatter, SystemClock};
use super::{
    CommentViewModel, CommentsView, CommentsViewModel, ErrorView, ErrorViewModel, LoadingView,
    LoadingViewModel,
};
use crate::config::{
    COMMENTS_VIEW_CONNECTION_ERROR_KEY, COMMENTS_VIEW_TITLE_KEY, LocalizationConfig,
};
use crate::types::Comment;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Where the presenter is in the load lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresenterState {
    /// No load started yet
    Idle,
    /// A load is in flight
    Loading,
    /// The last load succeeded with `count` comments
    Loaded {
        /// Number of rows emitted
        count: usize,
    },
    /// The last load failed
    Failed,
}

/// Drives the three views through the load lifecycle
///
/// Every reload re-enters [`PresenterState::Loading`]; there is no terminal
/// state. A failed load leaves the previously emitted rows untouched.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use feed_comments::config::LocalizationConfig;
/// use feed_comments::presentation::time::FixedClock;
/// use feed_comments::presentation::{
///     CommentsPresenter, CommentsView, CommentsViewModel, ErrorView, ErrorViewModel,
///     LoadingView, LoadingViewModel,
/// };
/// use feed_comments::types::Comment;
/// use std::sync::Arc;
///
/// struct PrintView;
///
/// impl CommentsView for PrintView {
///     fn display(&self, vm: CommentsViewModel) {
///         for row in vm.comments {
///             println!("{} ({}) {}", row.username, row.date, row.message);
///         }
///     }
/// }
/// impl LoadingView for PrintView {
///     fn display(&self, _vm: LoadingViewModel) {}
/// }
/// impl ErrorView for PrintView {
///     fn display(&self, _vm: ErrorViewModel) {}
/// }
///
/// let now = Utc.with_ymd_and_hms(2020, 5, 20, 12, 0, 0).unwrap();
/// let view = Arc::new(PrintView);
/// let presenter = CommentsPresenter::new(
///     view.clone(),
///     view.clone(),
///     view,
///     LocalizationConfig::default(),
/// )
/// .with_clock(Arc::new(FixedClock(now)));
///
/// let comment = Comment::new(uuid::Uuid::new_v4(), "hi", now - Duration::days(2), "ana");
/// assert_eq!(presenter.title(), "Comments");
/// presenter.did_start_loading();
/// presenter.did_finish_loading_comments(&[comment]);
/// ```
pub struct CommentsPresenter {
    comments_view: Arc<dyn CommentsView>,
    loading_view: Arc<dyn LoadingView>,
    error_view: Arc<dyn ErrorView>,
    localization: LocalizationConfig,
    clock: Arc<dyn Clock>,
    formatter: Arc<dyn RelativeTimeFormatter>,
    state: Mutex<PresenterState>,
}

impl CommentsPresenter {
    /// Create a presenter using the system clock and English formatting
    pub fn new(
        comments_view: Arc<dyn CommentsView>,
        loading_view: Arc<dyn LoadingView>,
        error_view: Arc<dyn ErrorView>,
        localization: LocalizationConfig,
    ) -> Self {
        Self {
            comments_view,
            loading_view,
            error_view,
            localization,
            clock: Arc::new(SystemClock),
            formatter: Arc::new(EnglishRelativeTimeFormatter),
            state: Mutex::new(PresenterState::Idle),
        }
    }

    /// Use `clock` as the reference for relative timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use `formatter` for relative timestamps
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn RelativeTimeFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Localized screen title
    pub fn title(&self) -> String {
        self.localization.string(COMMENTS_VIEW_TITLE_KEY)
    }

    /// Current lifecycle state
    pub fn state(&self) -> PresenterState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A load started: show the loading indicator and clear any error
    pub fn did_start_loading(&self) {
        self.set_state(PresenterState::Loading);
        self.error_view.display(ErrorViewModel::no_error());
        self.loading_view.display(LoadingViewModel { is_loading: true });
    }

    /// A load succeeded: hide the indicator and emit one row per comment
    pub fn did_finish_loading_comments(&self, comments: &[Comment]) {
        self.set_state(PresenterState::Loaded {
            count: comments.len(),
        });
        self.loading_view.display(LoadingViewModel { is_loading: false });
        self.error_view.display(ErrorViewModel::no_error());
        self.comments_view
            .display(Self::map(comments, self.clock.as_ref(), self.formatter.as_ref()));
    }

    /// A load failed: hide the indicator and show the localized error
    ///
    /// No rows are emitted, so whatever the view showed before stays.
    pub fn did_finish_loading_comments_with_error(&self) {
        self.set_state(PresenterState::Failed);
        self.loading_view.display(LoadingViewModel { is_loading: false });
        self.error_view.display(ErrorViewModel::error(
            self.localization.string(COMMENTS_VIEW_CONNECTION_ERROR_KEY),
        ));
    }

    /// Convert comments to rows, formatting timestamps relative to `clock`
    pub fn map(
        comments: &[Comment],
        clock: &dyn Clock,
        formatter: &dyn RelativeTimeFormatter,
    ) -> CommentsViewModel {
        let now = clock.now();
        CommentsViewModel {
            comments: comments
                .iter()
                .map(|comment| CommentViewModel {
                    message: comment.message.clone(),
                    date: formatter.format(comment.created_at, now),
                    username: comment.author.clone(),
                })
                .collect(),
        }
    }

    fn set_state(&self, next: PresenterState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(from = ?*state, to = ?next, "comments presenter state change");
        *state = next;
    }
}
