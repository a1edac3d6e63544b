// Axum host surface: exposes input fields, action triggers and output regions over HTTP.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::engine::panel::Panel;
use crate::surface::{Markup, MemorySurface};

#[derive(Clone)]
pub struct PanelState {
    pub panel: Arc<Panel>,
    pub surface: Arc<MemorySurface>,
}

pub struct PanelServer {
    port: u16,
    state: PanelState,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl PanelServer {
    /// Start the server on a random local port, returning a handle.
    pub async fn start(panel: Arc<Panel>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let state = PanelState {
            panel,
            surface: Arc::new(MemorySurface::new()),
        };
        let app = router(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });
        info!("panel server listening on 127.0.0.1:{}", port);

        Ok(Self {
            port,
            state,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// The surface the server reads inputs from and renders into.
    pub fn surface(&self) -> &Arc<MemorySurface> {
        &self.state.surface
    }

    /// Shutdown the server gracefully.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn router(state: PanelState) -> Router {
    Router::new()
        .route("/inputs/{field}", put(set_input_handler))
        .route("/actions/{name}", post(trigger_handler))
        .route("/outputs/{region}", get(output_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

fn markup_response(markup: &Markup) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, markup.content_type())],
        markup.body().to_string(),
    )
        .into_response()
}

/// PUT /inputs/{field}: body is the raw field text.
async fn set_input_handler(
    State(state): State<PanelState>,
    Path(field): Path<String>,
    body: String,
) -> StatusCode {
    debug!("input {} set ({} bytes)", field, body.len());
    state.surface.set_input(&field, body);
    StatusCode::NO_CONTENT
}

/// POST /actions/{name}: run the action and return what it rendered.
async fn trigger_handler(State(state): State<PanelState>, Path(name): Path<String>) -> Response {
    match state.panel.trigger(&name, &*state.surface).await {
        Some(outcome) => markup_response(&outcome.markup),
        None => (StatusCode::NOT_FOUND, "action not found").into_response(),
    }
}

/// GET /outputs/{region}: current content of an output region.
async fn output_handler(State(state): State<PanelState>, Path(region): Path<String>) -> Response {
    match state.surface.output(&region) {
        Some(markup) => markup_response(&markup),
        None => (StatusCode::NOT_FOUND, "region is empty").into_response(),
    }
}

async fn stats_handler(State(state): State<PanelState>) -> impl IntoResponse {
    Json(state.panel.stats())
}
