// Page handlers rendering askama templates.

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::AppState;
use crate::error::AppError;
use crate::models::VehicleRecord;

struct PagerItem {
    number: usize,
    current: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    rows: Vec<VehicleRecord>,
    page: usize,
    total_rows: usize,
    page_size: usize,
    pager: Vec<PagerItem>,
}

pub async fn index_page(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let view = app_state.session.view().await;
    let pager = if view.total_pages > 1 {
        (1..=view.total_pages)
            .map(|number| PagerItem {
                number,
                current: number == view.page,
            })
            .collect()
    } else {
        Vec::new()
    };
    let template = IndexTemplate {
        rows: view.rows,
        page: view.page,
        total_rows: view.total_rows,
        page_size: crate::session::PAGE_SIZE,
        pager,
    };
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render index template: {}", e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}
