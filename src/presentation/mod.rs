//! Presentation layer for loaded comments
//!
//! The UI is an external collaborator. It implements three narrow view
//! traits and receives plain view models; it never sees [`Comment`] values
//! or load errors.
//!
//! - [`CommentsPresenter`] - maps load events to view models
//! - [`CommentsPresentationAdapter`] - drives a loader and feeds the presenter
//! - [`WeakRefVirtualProxy`] - forwards to a view without keeping it alive
//! - [`time`] - relative timestamp formatting with an injectable clock
//!
//! [`Comment`]: crate::types::Comment

mod adapter;
mod presenter;
mod proxy;
pub mod time;

pub use adapter::{CommentsPresentationAdapter, CommentsRefreshDelegate};
pub use presenter::{CommentsPresenter, PresenterState};
pub use proxy::WeakRefVirtualProxy;

/// Whether a load is in progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingViewModel {
    /// True while a load is in flight
    pub is_loading: bool,
}

/// Error message to show, if any
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorViewModel {
    /// Localized message, or `None` to hide the error
    pub message: Option<String>,
}

impl ErrorViewModel {
    /// No error to show
    pub fn no_error() -> Self {
        Self { message: None }
    }

    /// Show `message`
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// A display-ready comment row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentViewModel {
    /// Comment text
    pub message: String,
    /// Creation time relative to now (e.g. "2 days ago")
    pub date: String,
    /// Author display name
    pub username: String,
}

/// Ordered list of comment rows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentsViewModel {
    /// Rows in server order
    pub comments: Vec<CommentViewModel>,
}

/// Receives comment rows
pub trait CommentsView: Send + Sync {
    /// Replace the displayed rows
    fn display(&self, view_model: CommentsViewModel);
}

/// Receives loading state changes
pub trait LoadingView: Send + Sync {
    /// Show or hide the loading indicator
    fn display(&self, view_model: LoadingViewModel);
}

/// Receives error message changes
pub trait ErrorView: Send + Sync {
    /// Show or clear the error message
    fn display(&self, view_model: ErrorViewModel);
}
