//! In-process fake of the measurement backend
//!
//! Serves `/api/detect-object` and `/api/measurements` on 127.0.0.1 with an
//! ephemeral port, records every multipart upload and answers with a
//! configurable status/body.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use gm_common::config::BackendConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One multipart request as the server saw it
#[derive(Debug, Clone, Default)]
pub struct RecordedUpload {
    pub fields: HashMap<String, String>,
    pub file_field: Option<String>,
    pub file_name: Option<String>,
    pub file_len: usize,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

struct BackendState {
    detect_uploads: Mutex<Vec<RecordedUpload>>,
    measurement_uploads: Mutex<Vec<RecordedUpload>>,
    detect_reply: Mutex<Reply>,
    measurement_reply: Mutex<Reply>,
}

pub struct FakeBackend {
    pub base_url: String,
    pub port: u16,
    state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState {
            detect_uploads: Mutex::new(Vec::new()),
            measurement_uploads: Mutex::new(Vec::new()),
            detect_reply: Mutex::new(Reply {
                status: StatusCode::OK,
                body: r#"{"object_name": "Shoe", "confidence": 0.91}"#.to_string(),
                delay: Duration::ZERO,
            }),
            measurement_reply: Mutex::new(Reply {
                status: StatusCode::CREATED,
                body: r#"{"measurement_id": "m1", "value": 12.5, "object_name": "Shoe", "unit": "cm"}"#
                    .to_string(),
                delay: Duration::ZERO,
            }),
        });

        let app = Router::new()
            .route("/api/detect-object", post(detect_object))
            .route("/api/measurements", post(measurements))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            port,
            state,
        }
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            scheme: "http".to_string(),
            host: "127.0.0.1".to_string(),
            port: self.port,
        }
    }

    pub fn reply_to_detect(&self, status: u16, body: &str) {
        let mut reply = self.state.detect_reply.lock().unwrap();
        reply.status = StatusCode::from_u16(status).unwrap();
        reply.body = body.to_string();
    }

    pub fn delay_detect(&self, delay: Duration) {
        self.state.detect_reply.lock().unwrap().delay = delay;
    }

    pub fn reply_to_measurements(&self, status: u16, body: &str) {
        let mut reply = self.state.measurement_reply.lock().unwrap();
        reply.status = StatusCode::from_u16(status).unwrap();
        reply.body = body.to_string();
    }

    pub fn delay_measurements(&self, delay: Duration) {
        self.state.measurement_reply.lock().unwrap().delay = delay;
    }

    pub fn detect_uploads(&self) -> Vec<RecordedUpload> {
        self.state.detect_uploads.lock().unwrap().clone()
    }

    pub fn measurement_uploads(&self) -> Vec<RecordedUpload> {
        self.state.measurement_uploads.lock().unwrap().clone()
    }
}

async fn read_upload(mut multipart: Multipart) -> RecordedUpload {
    let mut upload = RecordedUpload::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap();
                upload.file_field = Some(name);
                upload.file_name = Some(file_name);
                upload.file_len = bytes.len();
            }
            None => {
                let text = field.text().await.unwrap();
                upload.fields.insert(name, text);
            }
        }
    }
    upload
}

async fn detect_object(
    State(state): State<Arc<BackendState>>,
    multipart: Multipart,
) -> (StatusCode, String) {
    let upload = read_upload(multipart).await;
    state.detect_uploads.lock().unwrap().push(upload);
    let reply = state.detect_reply.lock().unwrap().clone();
    tokio::time::sleep(reply.delay).await;
    (reply.status, reply.body)
}

async fn measurements(
    State(state): State<Arc<BackendState>>,
    multipart: Multipart,
) -> (StatusCode, String) {
    let upload = read_upload(multipart).await;
    state.measurement_uploads.lock().unwrap().push(upload);
    let reply = state.measurement_reply.lock().unwrap().clone();
    tokio::time::sleep(reply.delay).await;
    (reply.status, reply.body)
}
