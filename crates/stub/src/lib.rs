// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A stand-in for the registration backend.
//!
//! The stub accepts `multipart/form-data` or JSON posts on one route,
//! records what it received, and answers with a configured status. It is
//! used for local development of the form and by end-to-end tests.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{FromRequest, Multipart, Request, State as AxumState},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Errors raised while running the stub.
#[derive(Debug, Error)]
pub enum StubError {
    /// Binding or serving failed.
    #[error("Stub server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stub behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    /// Route the registration is posted to.
    pub path: String,
    /// Status code returned for every well-formed post.
    pub status: u16,
    /// Message placed in the reply body.
    pub message: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            path: String::from("/login"),
            status: 200,
            message: String::from("New user added to database"),
        }
    }
}

/// How a received body was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyKind {
    Multipart,
    Json,
}

/// One part of a received multipart body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedPart {
    /// The part name.
    pub name: String,
    /// The file name, for file parts.
    pub file_name: Option<String>,
    /// The declared content type, if any.
    pub content_type: Option<String>,
    /// The part size in bytes.
    pub size: usize,
    /// The contents of text parts.
    pub text: Option<String>,
}

/// Everything the stub recorded about one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivedSubmission {
    /// The body encoding.
    pub kind: BodyKind,
    /// Multipart parts, in received order. Empty for JSON bodies.
    pub parts: Vec<ReceivedPart>,
    /// The JSON document, for JSON bodies.
    pub json: Option<serde_json::Value>,
}

impl ReceivedSubmission {
    /// Returns the part with the given name.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&ReceivedPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Returns the part names in received order.
    #[must_use]
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }
}

/// Shared stub state: configuration and the log of received posts.
#[derive(Debug, Clone)]
pub struct StubState {
    config: Arc<StubConfig>,
    received: Arc<Mutex<Vec<ReceivedSubmission>>>,
}

impl StubState {
    /// Creates state for the given configuration.
    #[must_use]
    pub fn new(config: StubConfig) -> Self {
        Self {
            config: Arc::new(config),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a copy of every submission received so far.
    pub async fn received(&self) -> Vec<ReceivedSubmission> {
        self.received.lock().await.clone()
    }
}

/// Reply body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubReply {
    /// Error indicator.
    pub error: bool,
    /// Reply message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<StubReply> = Json(StubReply {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Handler for the registration route.
async fn handle_registration(
    AxumState(state): AxumState<StubState>,
    request: Request,
) -> Result<(StatusCode, Json<StubReply>), HttpError> {
    let content_type: String = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let submission: ReceivedSubmission = if content_type.starts_with("multipart/form-data") {
        read_multipart(request, &state).await?
    } else if content_type.starts_with("application/json") {
        read_json(request, &state).await?
    } else {
        warn!(content_type = %content_type, "Rejected registration body");
        return Err(HttpError {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: format!("Unsupported content type: '{content_type}'"),
        });
    };

    info!(
        path = %state.config.path,
        kind = ?submission.kind,
        parts = submission.parts.len(),
        "Received registration"
    );
    state.received.lock().await.push(submission);

    let status: StatusCode = StatusCode::from_u16(state.config.status).map_err(|_| {
        error!(status = state.config.status, "Configured status is not valid");
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Invalid configured status {}", state.config.status),
        }
    })?;

    Ok((
        status,
        Json(StubReply {
            error: !status.is_success(),
            message: state.config.message.clone(),
        }),
    ))
}

async fn read_multipart(
    request: Request,
    state: &StubState,
) -> Result<ReceivedSubmission, HttpError> {
    let mut multipart: Multipart =
        Multipart::from_request(request, state)
            .await
            .map_err(|rejection| HttpError {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

    let mut parts: Vec<ReceivedPart> = Vec::new();
    loop {
        let field = multipart.next_field().await.map_err(|e| HttpError {
            status: e.status(),
            message: e.body_text(),
        })?;
        let Some(field) = field else {
            break;
        };

        let name: String = field.name().unwrap_or_default().to_string();
        let file_name: Option<String> = field.file_name().map(ToString::to_string);
        let content_type: Option<String> = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await.map_err(|e| HttpError {
            status: e.status(),
            message: e.body_text(),
        })?;

        let text: Option<String> = if file_name.is_none() {
            String::from_utf8(bytes.to_vec()).ok()
        } else {
            None
        };

        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            size: bytes.len(),
            text,
        });
    }

    Ok(ReceivedSubmission {
        kind: BodyKind::Multipart,
        parts,
        json: None,
    })
}

async fn read_json(request: Request, state: &StubState) -> Result<ReceivedSubmission, HttpError> {
    let Json(document) = Json::<serde_json::Value>::from_request(request, state)
        .await
        .map_err(|rejection| HttpError {
            status: rejection.status(),
            message: rejection.body_text(),
        })?;

    Ok(ReceivedSubmission {
        kind: BodyKind::Json,
        parts: Vec::new(),
        json: Some(document),
    })
}

/// Builds the stub router.
#[must_use]
pub fn build_router(state: StubState) -> Router {
    let path: String = if state.config.path.starts_with('/') {
        state.config.path.clone()
    } else {
        format!("/{}", state.config.path)
    };

    Router::new()
        .route(&path, post(handle_registration))
        .with_state(state)
}

/// Serves the stub on an already bound listener until the task is dropped.
///
/// # Errors
///
/// Returns `StubError::Io` if serving fails.
pub async fn serve(listener: TcpListener, state: StubState) -> Result<(), StubError> {
    let app: Router = build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Binds the stub to an ephemeral local port and serves it in the background.
///
/// Returns the bound address, the shared state for inspecting received
/// posts, and the server task.
///
/// # Errors
///
/// Returns `StubError::Io` if the port cannot be bound.
pub async fn spawn(
    config: StubConfig,
) -> Result<(SocketAddr, StubState, JoinHandle<Result<(), StubError>>), StubError> {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let state: StubState = StubState::new(config);

    info!(%addr, "Stub registration backend listening");
    let handle = tokio::spawn(serve(listener, state.clone()));

    Ok((addr, state, handle))
}
