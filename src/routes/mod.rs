// Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

mod api;
mod pages;

pub fn create_router(app_state: AppState) -> Router {
    // API routes; handlers take AppState via the State extractor.
    let api_router = Router::new()
        .route("/vehicles", get(api::get_vehicles))
        .route("/search", post(api::submit_search))
        .route("/page/:page", post(api::go_to_page))
        .route("/reset", post(api::reset_search))
        .route("/status", get(api::get_status))
        .with_state(app_state.clone());

    Router::new()
        .route("/", get(pages::index_page))
        .nest("/api", api_router)
        .with_state(app_state)
}
