//! Router harness

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use liveblog::backend::routes::create_router;
use liveblog::backend::{
    AppState, BroadcastChannel, Broadcaster, LocalBroadcaster, PostRepository, PublishPipeline,
};
use liveblog::shared::RealtimeInfo;
use tower::ServiceExt;

use super::database::TestDatabase;

pub const INDEX_HTML: &str = "<html><body>live blog</body></html>";
pub const ADMIN_HTML: &str = "<html><body>admin</body></html>";

pub struct TestApp {
    pub router: Router,
    pub db: TestDatabase,
    pub relay: LocalBroadcaster,
}

impl TestApp {
    /// App publishing through the in-process relay
    pub async fn new() -> Self {
        let relay = LocalBroadcaster::new(16);
        Self::build(TestDatabase::new().await, None, Arc::new(relay.clone()), relay).await
    }

    /// App publishing through `broadcaster`
    pub async fn with_broadcaster(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self::build(TestDatabase::new().await, None, broadcaster, LocalBroadcaster::new(16)).await
    }

    /// App whose store calls are bounded by `timeout`
    pub async fn with_store_timeout(timeout: Duration, broadcaster: Arc<dyn Broadcaster>) -> Self {
        let db = TestDatabase::new().await;
        let repository: Arc<dyn PostRepository> = Arc::new(db.repository_with_timeout(timeout).await);
        Self::build(db, Some(repository), broadcaster, LocalBroadcaster::new(16)).await
    }

    async fn build(
        db: TestDatabase,
        repository: Option<Arc<dyn PostRepository>>,
        broadcaster: Arc<dyn Broadcaster>,
        relay: LocalBroadcaster,
    ) -> Self {

        let public_dir = db.dir().path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(public_dir.join("admin.html"), ADMIN_HTML).unwrap();

        let channel = BroadcastChannel::new(
            "live-blog-stream",
            "new-post",
            broadcaster,
            Duration::from_secs(1),
        );
        let repository = repository.unwrap_or_else(|| Arc::new(db.repository()) as Arc<dyn PostRepository>);
        let pipeline = PublishPipeline::new(repository, channel);
        let state = AppState::new(pipeline, relay.clone(), RealtimeInfo::local("new-post"));
        let router = create_router(state, &public_dir);

        Self { router, db, relay }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// POST /posts, returning the raw response headers as well
    pub async fn create_post_with_headers(
        &self,
        content: &str,
    ) -> (StatusCode, header::HeaderMap, serde_json::Value) {
        let request = Request::post("/posts")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("content={}", urlencode(content))))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// POST /posts with a urlencoded `content` field
    pub async fn create_post(&self, content: &str) -> (StatusCode, serde_json::Value) {
        let form = format!("content={}", urlencode(content));
        self.post_form(&form).await
    }

    pub async fn post_form(&self, form: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::post("/posts")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

/// Minimal urlencoding for test payloads
pub fn urlencode(input: &str) -> String {
    input
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
