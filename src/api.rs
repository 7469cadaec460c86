// src/api.rs
//! HTTP surface: health check, one-shot news aggregation, trending panel.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::pipeline::Pipeline;
use crate::trending::TrendingCache;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    trending: TrendingCache,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, trending: TrendingCache) -> Self {
        Self { pipeline, trending }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/news", get(get_news).post(post_news))
        .route("/api/trending", get(get_trending))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct NewsQuery {
    q: Option<String>,
}

async fn get_news(State(state): State<AppState>, Query(query): Query<NewsQuery>) -> Response {
    news_response(state, query.q).await
}

async fn post_news(State(state): State<AppState>, Json(query): Json<NewsQuery>) -> Response {
    news_response(state, query.q).await
}

/// Shared GET/POST handler. Status mapping:
/// missing query -> 400, pipeline `error` -> 500, empty articles -> 404
/// (the result body carries the explanatory warning), otherwise 200.
async fn news_response(state: AppState, q: Option<String>) -> Response {
    let Some(topic) = q.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no query provided" })),
        )
            .into_response();
    };

    let result = state.pipeline.handle_query(&topic).await;

    if let Some(error) = &result.error {
        tracing::error!(topic, error, "aggregation request failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error })),
        )
            .into_response();
    }
    if result.articles.is_empty() {
        return (StatusCode::NOT_FOUND, Json(result)).into_response();
    }
    Json(result).into_response()
}

async fn get_trending(State(state): State<AppState>) -> Response {
    let snapshot = state.trending.snapshot();
    Json(&*snapshot).into_response()
}
