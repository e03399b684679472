//! Weak forwarding to a view owned elsewhere

use super::{
    CommentsView, CommentsViewModel, ErrorView, ErrorViewModel, LoadingView, LoadingViewModel,
};
use std::sync::{Arc, Weak};

/// Forwards view updates to a view without owning it
///
/// The presenter holds the proxy strongly while the screen owns the view, so
/// the presenter never keeps a closed screen alive. Updates sent after the
/// view is dropped are ignored.
pub struct WeakRefVirtualProxy<V: ?Sized> {
    object: Weak<V>,
}

impl<V: ?Sized> WeakRefVirtualProxy<V> {
    /// Create a proxy pointing at `object`
    pub fn new(object: &Arc<V>) -> Self {
        Self {
            object: Arc::downgrade(object),
        }
    }

    fn with_object(&self, f: impl FnOnce(&V)) {
        if let Some(object) = self.object.upgrade() {
            f(&object);
        }
    }
}

impl<V: CommentsView + ?Sized> CommentsView for WeakRefVirtualProxy<V> {
    fn display(&self, view_model: CommentsViewModel) {
        self.with_object(|view| CommentsView::display(view, view_model));
    }
}

impl<V: LoadingView + ?Sized> LoadingView for WeakRefVirtualProxy<V> {
    fn display(&self, view_model: LoadingViewModel) {
        self.with_object(|view| LoadingView::display(view, view_model));
    }
}

impl<V: ErrorView + ?Sized> ErrorView for WeakRefVirtualProxy<V> {
    fn display(&self, view_model: ErrorViewModel) {
        self.with_object(|view| ErrorView::display(view, view_model));
    }
}
