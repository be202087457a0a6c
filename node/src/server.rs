// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use answer_kernel::AnswerStore;

use crate::api::*;
use crate::engine::{Engine, SharedEngine};
use crate::errors::EngineError;

/// The router with trailing slashes trimmed before routing.
pub type App = NormalizePath<Router>;

// A key literally named "metrics" is shadowed by the metrics route.
pub fn build_router<S>(state: SharedEngine<S>) -> App
where
    S: AnswerStore + Send + 'static,
{
    let router = Router::new()
        .route("/", post(post_event::<S>))
        .route("/history/:key", get(get_history::<S>))
        .route("/metrics", get(metrics_handler))
        .route("/:key", get(get_answer::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}

/// Run `f` against the engine on a blocking worker and wait for its result.
///
/// The engine lock is held for the whole call, so commands never
/// interleave their lookup and write steps.
async fn run_blocking<S, T, F>(state: SharedEngine<S>, f: F) -> Result<T, EngineError>
where
    S: AnswerStore + Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut Engine<S>) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut engine = state.blocking_lock();
        f(&mut engine)
    })
    .await
    .map_err(|e| {
        tracing::error!("Engine worker failed: {}", e);
        EngineError::Internal
    })
}

async fn post_event<S>(
    State(state): State<SharedEngine<S>>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, EngineError>
where
    S: AnswerStore + Send + 'static,
{
    let Json(request) = payload.map_err(|e| EngineError::InvalidInput(e.body_text()))?;
    let data = request.string_data()?;
    let kind = request.kind;

    run_blocking(state, move |engine| engine.submit(&kind, &data))
        .await?
        .map_err(EngineError::Command)?;

    Ok(Json(MessageResponse::success()))
}

async fn get_answer<S>(
    State(state): State<SharedEngine<S>>,
    Path(key): Path<String>,
) -> Result<Json<AnswerResponse>, EngineError>
where
    S: AnswerStore + Send + 'static,
{
    let answer = run_blocking(state, move |engine| engine.current(&key))
        .await?
        .map_err(EngineError::Query)?;

    Ok(Json(AnswerResponse {
        message: SUCCESS.to_string(),
        answer,
    }))
}

async fn get_history<S>(
    State(state): State<SharedEngine<S>>,
    Path(key): Path<String>,
) -> Result<Json<HistoryResponse>, EngineError>
where
    S: AnswerStore + Send + 'static,
{
    let events = run_blocking(state, move |engine| engine.history(&key))
        .await?
        .map_err(EngineError::Query)?;

    Ok(Json(HistoryResponse {
        message: SUCCESS.to_string(),
        events,
    }))
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
