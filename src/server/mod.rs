// SPDX-License-Identifier: MIT

//! HTTP front-end for the visual editor
//!
//! The editor posts the dialog it is showing (or names one stored in the
//! dialog directory) and receives the graph to render.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::error::ObiError;
use crate::obi::{consume, DialogLoader, ObiDocument, Transformer};

type Reply = (StatusCode, Json<Value>);

/// Shared handler state
pub struct AppState {
    transformer: Transformer,
    loader: DialogLoader,
    dialog_dir: PathBuf,
}

impl AppState {
    pub fn new(dialog_dir: impl Into<PathBuf>) -> Self {
        Self {
            transformer: Transformer::new(),
            loader: DialogLoader::new(),
            dialog_dir: dialog_dir.into(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/graph", post(transform_document))
        .route("/api/dialogs", get(list_dialogs))
        .route("/api/dialogs/{id}/graph", get(dialog_graph))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: &Config) -> Result<(), ObiError> {
    let state = Arc::new(AppState::new(config.dialog_dir.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    log::info!(
        "Listening on http://{} (dialogs in {})",
        addr,
        config.dialog_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn transform_document(State(state): State<Arc<AppState>>, Json(doc): Json<Value>) -> Reply {
    graph_reply(&state.transformer, &doc)
}

async fn list_dialogs(State(state): State<Arc<AppState>>) -> Reply {
    let worker = state.clone();
    let listed =
        tokio::task::spawn_blocking(move || worker.loader.list_dialogs(&worker.dialog_dir)).await;

    match listed {
        Ok(Ok(dialogs)) => (StatusCode::OK, Json(json!(dialogs))),
        Ok(Err(e)) => {
            log::warn!("Failed to list {}: {}", state.dialog_dir.display(), e);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn dialog_graph(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Reply {
    let worker = state.clone();
    let lookup = id.clone();
    let loaded = tokio::task::spawn_blocking(move || {
        let path = worker.loader.find_dialog(&worker.dialog_dir, &lookup)?;
        worker.loader.load_dialog(path)
    })
    .await;

    match loaded {
        Ok(Ok(doc)) => graph_reply(&state.transformer, &doc),
        Ok(Err(ObiError::DialogNotFound(_))) => {
            log::info!("Dialog not found: {}", id);
            error_reply(StatusCode::NOT_FOUND, "Dialog not found")
        }
        Ok(Err(e)) => {
            log::warn!("Failed to load dialog {}: {}", id, e);
            error_reply(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn graph_reply(transformer: &Transformer, doc: &Value) -> Reply {
    let Some(strategy) = transformer.choose_strategy(Some(doc)) else {
        return (StatusCode::OK, Json(json!({ "strategy": null, "nodes": [] })));
    };

    match consume(&ObiDocument::new(doc), strategy) {
        Ok(nodes) => (
            StatusCode::OK,
            Json(json!({ "strategy": strategy.kind().to_string(), "nodes": nodes })),
        ),
        Err(e) => {
            log::error!("Graph construction failed: {}", e);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> Reply {
    (status, Json(json!({ "error": message.into() })))
}
