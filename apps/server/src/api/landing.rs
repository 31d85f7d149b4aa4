use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use charity_core::{categories::Category, institutions::Institution, landing::LandingPage};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct LandingQuery {
    page: Option<String>,
}

/// Totals and the three institution groups, paginated by one `page` parameter.
async fn get_landing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LandingQuery>,
) -> ApiResult<Json<LandingPage>> {
    let page = state
        .landing_service
        .get_landing_page(query.page.as_deref())?;
    Ok(Json(page))
}

async fn get_institutions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Institution>>> {
    Ok(Json(state.institution_service.get_institutions()?))
}

async fn get_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.category_service.get_categories()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/landing", get(get_landing))
        .route("/institutions", get(get_institutions))
        .route("/categories", get(get_categories))
}
