// Handlers for backend API endpoints

use axum::{
    extract::{Json as JsonExtract, Path, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::AppError;
use crate::models::ResultView;
use crate::session::StatusFlags;

// Notification texts the presentation shows when a search settles. An empty
// catalog and a filter that matched nothing produce the same message.
const MSG_RESULTS: &str = "Data fetched successfully";
const MSG_NO_RESULTS: &str = "No matching data";

// --- Request/Response Structs ---

#[derive(Deserialize, Debug)]
pub struct SearchRequest {
    query: String,
}

#[derive(Serialize)]
struct SearchResponse {
    // False when no search ran at all: blank query, or superseded by a newer
    // submission before its settle delay elapsed.
    performed: bool,
    matched: usize,
    total_pages: usize,
    message: Option<String>,
}

// --- API Handlers ---

pub async fn get_vehicles(
    State(app_state): State<AppState>,
) -> Result<Json<ResultView>, AppError> {
    Ok(Json(app_state.session.view().await))
}

pub async fn submit_search(
    State(app_state): State<AppState>,
    JsonExtract(request): JsonExtract<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(query = %request.query, "API call: submit_search");

    match app_state.session.submit_query(&request.query).await {
        Some(outcome) => {
            let message = if outcome.matched > 0 {
                MSG_RESULTS
            } else {
                MSG_NO_RESULTS
            };
            let view = app_state.session.view().await;
            Ok(Json(SearchResponse {
                performed: true,
                matched: outcome.matched,
                total_pages: view.total_pages,
                message: Some(message.to_string()),
            }))
        }
        None => Ok(Json(SearchResponse {
            performed: false,
            matched: 0,
            total_pages: 0,
            message: None,
        })),
    }
}

pub async fn go_to_page(
    State(app_state): State<AppState>,
    Path(page): Path<usize>,
) -> Result<Json<ResultView>, AppError> {
    tracing::info!(page, "API call: go_to_page");
    // Out-of-range pages leave the view untouched; the caller gets the
    // (possibly unchanged) current window back.
    Ok(Json(app_state.session.go_to_page(page).await))
}

pub async fn reset_search(
    State(app_state): State<AppState>,
) -> Result<Json<ResultView>, AppError> {
    tracing::info!("API call: reset_search");
    Ok(Json(app_state.session.reset().await))
}

pub async fn get_status(
    State(app_state): State<AppState>,
) -> Result<Json<StatusFlags>, AppError> {
    Ok(Json(app_state.session.status().await))
}
