use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
    response::{Html, IntoResponse},
};
use tower_http::cors::{Any, CorsLayer};
use chrono::Utc;
use std::time::{Duration, Instant};

use crate::api::models::{EvaluateRequest, EvaluateResponse, SummarizeRequest, SummarizeResponse};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::eval::{evaluate_split, mean_scores};
use crate::AppState;

/// Beam search over a long article can take a while on CPU; anything
/// beyond this is treated as the model capability being unavailable.
const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(120);

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/summarize", post(summarize_handler))
        .route("/api/evaluate", post(evaluate_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Single-page front end: one text box, one button, one output area.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(chars = req.text.len(), "processing summarize request");
    let start = Instant::now();

    let request = req.into_summary_request();
    let summarizer = state.summarizer.clone();

    // Generation is synchronous and CPU-bound, so it runs off the runtime.
    let summary = tokio::time::timeout(
        SUMMARIZE_TIMEOUT,
        tokio::task::spawn_blocking(move || summarizer.summarize(&request)),
    )
    .await
    .map_err(|_| AppError::Dependency("summarization timed out".to_string()))?
    .map_err(|e| AppError::Dependency(format!("summarization task failed: {e}")))??;

    tracing::info!(elapsed = ?start.elapsed(), "summarize request completed");

    let word_count = summary.text.split_whitespace().count();
    Ok(response::success(SummarizeResponse {
        summary: summary.text,
        word_count,
        generated_at: Utc::now(),
    }))
}

async fn evaluate_handler(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<impl IntoResponse> {
    let store = state.dataset.clone().ok_or_else(|| {
        AppError::Dependency("no dataset configured; set DATA_DIR to enable evaluation".to_string())
    })?;

    tracing::info!(split = %req.split, sample_count = req.sample_count, "starting evaluation batch");
    let start = Instant::now();

    let summarizer = state.summarizer.clone();
    let scorer = state.scorer.clone();
    let split = req.split;
    let sample_count = req.sample_count;

    // No timeout here: a batch is as long as it is, and a failure on any
    // sample aborts the whole run.
    let samples = tokio::task::spawn_blocking(move || {
        evaluate_split(&store, split, sample_count, &summarizer, &scorer)
    })
    .await
    .map_err(|e| AppError::Dependency(format!("evaluation task failed: {e}")))??;

    tracing::info!(
        elapsed = ?start.elapsed(),
        samples = samples.len(),
        "evaluation batch completed"
    );

    let mean = mean_scores(&samples);
    Ok(response::success(EvaluateResponse {
        split,
        sample_count,
        mean,
        samples,
        evaluated_at: Utc::now(),
    }))
}
