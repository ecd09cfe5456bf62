#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use stockflow_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Test harness: the real router and services over a scratch SQLite file.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _tmp: TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a test application with fresh database state.
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let db_path = tmp.path().join("stockflow_test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let mut cfg = AppConfig::new(
            database_url,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("db connect");
        db::run_migrations(&pool).await.expect("migrations");

        let db_arc = Arc::new(pool);
        let (tx, rx) = mpsc::channel(100);
        let event_sender = EventSender::new(tx);
        let event_task = tokio::spawn(events::process_events(rx));

        let services = AppServices::new(db_arc.clone(), event_sender.clone(), &cfg);
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", stockflow_api::api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _tmp: tmp,
            _event_task: event_task,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None).await
    }

    /// Raw response body, for non-JSON endpoints such as the CSV export.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(path)
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                builder
                    .body(Body::from(json.to_string()))
                    .expect("build request")
            }
            None => builder.body(Body::empty()).expect("build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
