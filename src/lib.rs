//! # feed-comments
//!
//! Client-side library for loading the comments of a feed item from a remote
//! endpoint and presenting them through a small set of view traits.
//!
//! ## Design Philosophy
//!
//! feed-comments is designed to be:
//! - **Decoupled** - Loaders, executors and views are traits; the UI is an external collaborator
//! - **Strict** - Responses are validated in full or rejected as invalid data
//! - **Cancellable** - Every load returns a task that suppresses delivery when cancelled
//! - **Thread-aware** - Completions are redelivered on the UI's own queue
//!
//! ## Quick Start
//!
//! ```no_run
//! use feed_comments::composer::CommentsUIComposer;
//! use feed_comments::config::Config;
//! use feed_comments::dispatch::MainQueue;
//! use feed_comments::http::ReqwestHttpClient;
//! use feed_comments::loader::RemoteCommentsLoader;
//! use feed_comments::presentation::time::SystemClock;
//! use feed_comments::presentation::{
//!     CommentsView, CommentsViewModel, ErrorView, ErrorViewModel, LoadingView,
//!     LoadingViewModel,
//! };
//! use std::sync::Arc;
//!
//! struct Screen;
//!
//! impl CommentsView for Screen {
//!     fn display(&self, vm: CommentsViewModel) {
//!         for row in vm.comments {
//!             println!("{} - {} ({})", row.username, row.message, row.date);
//!         }
//!     }
//! }
//! impl LoadingView for Screen {
//!     fn display(&self, vm: LoadingViewModel) {
//!         println!("loading: {}", vm.is_loading);
//!     }
//! }
//! impl ErrorView for Screen {
//!     fn display(&self, vm: ErrorViewModel) {
//!         if let Some(message) = vm.message {
//!             println!("error: {}", message);
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = ReqwestHttpClient::new(&config.http)?;
//!     let (queue, runner) = MainQueue::new();
//!     let screen = Arc::new(Screen);
//!
//!     let comments = CommentsUIComposer::compose(
//!         RemoteCommentsLoader::new(Arc::new(client)),
//!         "https://example.com/v1/image/1/comments".parse()?,
//!         queue,
//!         &screen,
//!         config.localization,
//!         Arc::new(SystemClock),
//!     );
//!
//!     println!("{}", comments.presenter().title());
//!     let _task = comments.did_request_comments();
//!
//!     // View updates run here, on the thread that created the queue
//!     drop(comments);
//!     runner.run().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Pipeline assembly for one screen
pub mod composer;
/// Configuration types
pub mod config;
/// Completion redelivery onto a UI-owned queue
pub mod dispatch;
/// Error types
pub mod error;
/// HTTP transport seam and reqwest implementation
pub mod http;
/// Comment loaders
pub mod loader;
/// Wire format validation and decoding
pub mod mapper;
/// Presenter, adapter and view boundary
pub mod presentation;
/// Core domain types
pub mod types;

// Re-export commonly used types
pub use composer::CommentsUIComposer;
pub use config::{Config, HttpConfig, LocalizationConfig};
pub use dispatch::{ImmediateExecutor, MainQueue, MainQueueDispatchDecorator, MainQueueRunner};
pub use error::{Error, HttpClientError, LoadError, MappingError, Result};
pub use http::{HttpClient, HttpClientTask, ReqwestHttpClient};
pub use loader::{CommentsLoader, LoadTask, RemoteCommentsLoader, load_comments};
pub use mapper::CommentsMapper;
pub use presentation::{CommentsPresentationAdapter, CommentsPresenter};
pub use types::{Comment, HttpResponse};
