//! End-to-end tests: reqwest client against a mock HTTP server

use chrono::{TimeZone, Utc};
use feed_comments::composer::CommentsUIComposer;
use feed_comments::config::{HttpConfig, LocalizationConfig};
use feed_comments::dispatch::MainQueue;
use feed_comments::http::ReqwestHttpClient;
use feed_comments::loader::{CommentsLoader, RemoteCommentsLoader, load_comments};
use feed_comments::presentation::time::FixedClock;
use feed_comments::presentation::{
    CommentsView, CommentsViewModel, ErrorView, ErrorViewModel, LoadingView, LoadingViewModel,
};
use feed_comments::{Comment, LoadError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMENTS_PATH: &str = "/v1/image/2239cba2-cb35-4392-adc0-24a37d38e010/comments";

// ===================================================================
// Helpers
// ===================================================================

async fn mount(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

fn comments_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), COMMENTS_PATH)).unwrap()
}

fn make_loader() -> RemoteCommentsLoader {
    let client = ReqwestHttpClient::new(&HttpConfig::default()).unwrap();
    RemoteCommentsLoader::new(Arc::new(client))
}

fn items_body(id: Uuid) -> serde_json::Value {
    json!({
        "items": [
            {
                "id": id.to_string(),
                "message": "a message",
                "created_at": "2020-05-18T12:00:00+00:00",
                "author": { "username": "a username" }
            }
        ]
    })
}

// ===================================================================
// RemoteCommentsLoader + ReqwestHttpClient
// ===================================================================

#[tokio::test]
async fn test_load_delivers_mapped_comments() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    mount(&server, ResponseTemplate::new(200).set_body_json(items_body(id))).await;

    let result = load_comments(&make_loader(), &comments_url(&server))
        .await
        .expect("completion should be delivered");

    let expected = Comment::new(
        id,
        "a message",
        Utc.with_ymd_and_hms(2020, 5, 18, 12, 0, 0).unwrap(),
        "a username",
    );
    assert_eq!(result, Ok(vec![expected]));
}

#[tokio::test]
async fn test_load_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(header("user-agent", "comments-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpConfig {
        user_agent: "comments-test/1.0".to_string(),
        ..HttpConfig::default()
    };
    let loader = RemoteCommentsLoader::new(Arc::new(ReqwestHttpClient::new(&config).unwrap()));

    let result = load_comments(&loader, &comments_url(&server)).await;
    assert_eq!(result, Some(Ok(vec![])));
}

#[tokio::test]
async fn test_load_non_2xx_is_invalid_data() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(404).set_body_json(items_body(Uuid::new_v4()))).await;

    let result = load_comments(&make_loader(), &comments_url(&server)).await;
    assert_eq!(result, Some(Err(LoadError::InvalidData)));
}

#[tokio::test]
async fn test_load_malformed_body_is_invalid_data() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let result = load_comments(&make_loader(), &comments_url(&server)).await;
    assert_eq!(result, Some(Err(LoadError::InvalidData)));
}

#[tokio::test]
async fn test_load_connection_refused_is_connectivity() {
    // Bind then release a port so nothing listens on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = Url::parse(&format!("http://127.0.0.1:{}/comments", port)).unwrap();
    let result = load_comments(&make_loader(), &url).await;

    assert_eq!(result, Some(Err(LoadError::Connectivity)));
}

#[tokio::test]
async fn test_cancel_drops_completion_without_calling_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let loader = make_loader();
    let (tx, rx) = tokio::sync::oneshot::channel();
    let task = loader.load(
        &comments_url(&server),
        Box::new(move |result| {
            tx.send(result).ok();
        }),
    );
    task.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(5), rx)
        .await
        .expect("cancelled load should release its completion promptly");
    assert!(outcome.is_err(), "completion must not be called after cancel");
}

#[tokio::test]
async fn test_dropped_loader_delivers_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [] }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let loader = make_loader();
    let (tx, rx) = tokio::sync::oneshot::channel();
    let _task = loader.load(
        &comments_url(&server),
        Box::new(move |result| {
            tx.send(result).ok();
        }),
    );
    drop(loader);

    let outcome = tokio::time::timeout(Duration::from_secs(5), rx)
        .await
        .expect("response should arrive within the timeout");
    assert!(outcome.is_err(), "released loader must not deliver");
}

// ===================================================================
// Full pipeline: composer + main queue + presenter
// ===================================================================

#[derive(Default)]
struct ScreenSpy {
    owner: Option<std::thread::ThreadId>,
    rows: Mutex<Vec<CommentsViewModel>>,
    errors: Mutex<Vec<Option<String>>>,
    loading: Mutex<Vec<bool>>,
    off_thread_updates: Mutex<usize>,
}

impl ScreenSpy {
    fn on_current_thread() -> Self {
        Self {
            owner: Some(std::thread::current().id()),
            ..Self::default()
        }
    }

    fn record_thread(&self) {
        if self.owner != Some(std::thread::current().id()) {
            *self.off_thread_updates.lock().unwrap() += 1;
        }
    }
}

impl CommentsView for ScreenSpy {
    fn display(&self, vm: CommentsViewModel) {
        self.record_thread();
        self.rows.lock().unwrap().push(vm);
    }
}

impl LoadingView for ScreenSpy {
    fn display(&self, vm: LoadingViewModel) {
        self.record_thread();
        self.loading.lock().unwrap().push(vm.is_loading);
    }
}

impl ErrorView for ScreenSpy {
    fn display(&self, vm: ErrorViewModel) {
        self.record_thread();
        self.errors.lock().unwrap().push(vm.message);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pipeline_updates_view_on_main_queue() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(items_body(Uuid::new_v4()))).await;

    let now = Utc.with_ymd_and_hms(2020, 5, 20, 12, 0, 0).unwrap();
    let (queue, mut runner) = MainQueue::new();
    let screen = Arc::new(ScreenSpy::on_current_thread());
    let comments = CommentsUIComposer::compose(
        make_loader(),
        comments_url(&server),
        queue,
        &screen,
        LocalizationConfig::default(),
        Arc::new(FixedClock(now)),
    );

    let _task = comments.did_request_comments();
    assert_eq!(*screen.loading.lock().unwrap(), vec![true]);

    let ran = tokio::time::timeout(Duration::from_secs(5), runner.run_next())
        .await
        .expect("completion should be posted to the main queue");
    assert!(ran);

    let rows = screen.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].comments[0].message, "a message");
    assert_eq!(rows[0].comments[0].username, "a username");
    assert_eq!(rows[0].comments[0].date, "2 days ago");
    assert_eq!(*screen.loading.lock().unwrap(), vec![true, false]);
    assert_eq!(*screen.off_thread_updates.lock().unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pipeline_shows_localized_error_on_failure() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let (queue, mut runner) = MainQueue::new();
    let screen = Arc::new(ScreenSpy::on_current_thread());
    let comments = CommentsUIComposer::compose(
        make_loader(),
        comments_url(&server),
        queue,
        &screen,
        LocalizationConfig::default(),
        Arc::new(FixedClock(Utc::now())),
    );

    let _task = comments.did_request_comments();
    let ran = tokio::time::timeout(Duration::from_secs(5), runner.run_next())
        .await
        .expect("completion should be posted to the main queue");
    assert!(ran);

    assert!(screen.rows.lock().unwrap().is_empty());
    assert_eq!(
        screen.errors.lock().unwrap().last(),
        Some(&Some("Couldn't connect to server".to_string()))
    );
    assert_eq!(*screen.off_thread_updates.lock().unwrap(), 0);
}
