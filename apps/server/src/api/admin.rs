//! Maintenance of institutions and categories, for superusers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, post, put},
    Json, Router,
};
use charity_core::{
    categories::{Category, NewCategory},
    institutions::{Institution, NewInstitution},
};

use crate::{
    auth::{require_session, require_superuser},
    error::ApiResult,
    main_lib::AppState,
};

async fn create_institution(
    State(state): State<Arc<AppState>>,
    Json(institution): Json<NewInstitution>,
) -> ApiResult<(StatusCode, Json<Institution>)> {
    let created = state
        .institution_service
        .create_institution(institution)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_institution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(changes): Json<NewInstitution>,
) -> ApiResult<Json<Institution>> {
    let changes = changes.validated()?;
    let updated = state
        .institution_service
        .update_institution(Institution {
            id,
            name: changes.name,
            description: changes.description,
            kind: changes.kind,
        })
        .await?;
    Ok(Json(updated))
}

async fn delete_institution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.institution_service.delete_institution(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(category): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = state.category_service.create_category(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/institutions", post(create_institution))
        .route(
            "/admin/institutions/{id}",
            put(update_institution).delete(delete_institution),
        )
        .route("/admin/categories", post(create_category))
        .route("/admin/categories/{id}", delete(delete_category))
        .route_layer(middleware::from_fn(require_superuser))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
