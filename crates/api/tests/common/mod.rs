#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vanity_api::config::ServerConfig;
use vanity_api::router::build_app_router;
use vanity_api::state::AppState;
use vanity_store::memory::InMemoryKvStore;
use vanity_store::{KvStore, SharedStore, StoreError};

/// Build a test `ServerConfig` matching the development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// The production router over `store`.
pub fn build_test_app(store: SharedStore) -> Router {
    let config = test_config();
    let state = AppState::new(store);
    build_app_router(state, &config)
}

/// A router over a fresh in-memory store.
pub fn memory_app() -> (Router, Arc<InMemoryKvStore>) {
    let store = Arc::new(InMemoryKvStore::new());
    (build_test_app(store.clone()), store)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), false).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), false).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body.to_string()), true).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Body::from(body.to_string()), true).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body), true).await
}

async fn send(app: Router, method: Method, uri: &str, body: Body, json: bool) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if json {
        builder = builder.header("content-type", "application/json");
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// In-memory store that can be told to fail.
///
/// Writes to keys containing `poison` fail, and every operation fails while
/// the store is marked down.
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryKvStore,
    down: AtomicBool,
    poison: Option<String>,
}

impl FlakyStore {
    pub fn down() -> Self {
        let store = Self::default();
        store.down.store(true, Ordering::SeqCst);
        store
    }

    pub fn poisoned(marker: &str) -> Self {
        Self {
            poison: Some(marker.to_string()),
            ..Self::default()
        }
    }

    fn check(&self, key: Option<&str>) -> Result<(), StoreError> {
        let poisoned = match (key, self.poison.as_deref()) {
            (Some(key), Some(marker)) => key.contains(marker),
            _ => false,
        };
        if self.down.load(Ordering::SeqCst) || poisoned {
            return Err(StoreError::Backend {
                status: 503,
                body: "connection refused by upstream at 10.0.0.7".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.check(None)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.check(Some(key))?;
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check(None)?;
        self.inner.delete(key).await
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        self.check(None)?;
        self.inner.scan_prefix(prefix).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check(None)
    }
}
