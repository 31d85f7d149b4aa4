use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use charity_core::{
    donations::Donation,
    users::{PasswordChange, ProfileUpdate, User},
};
use serde::Serialize;

use crate::{
    auth::{confirm_password, require_session, CurrentSession},
    error::ApiResult,
    main_lib::AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfilePage {
    user: User,
    donations: Vec<Donation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsPage {
    profile: ProfileUpdate,
}

/// The user and their donation history.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<Json<ProfilePage>> {
    let donations = state.donation_service.get_user_donations(&session.user)?;
    Ok(Json(ProfilePage {
        user: session.user,
        donations,
    }))
}

async fn mark_donation_taken(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Donation>>> {
    let history = state.donation_service.mark_taken(&session.user, &id).await?;
    Ok(Json(history))
}

async fn get_settings(current: CurrentSession) -> ApiResult<Json<SettingsPage>> {
    let user = current.require_confirmed()?;
    Ok(Json(SettingsPage {
        profile: ProfileUpdate::from(user),
    }))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<User>> {
    let user = current.require_confirmed()?;
    let updated = state.user_service.update_profile(user, update).await?;
    Ok(Json(updated))
}

/// Changes the password and ends the session; every token issued before is void.
async fn change_password(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(change): Json<PasswordChange>,
) -> ApiResult<Response> {
    let user = current.require_confirmed()?;
    state.user_service.change_password(user, change).await?;
    tracing::info!("User {} changed their password; sessions revoked", user.id);
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, state.auth.clear_cookie())],
    )
        .into_response())
}

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/account/profile", get(get_profile).put(update_profile))
        .route("/account/donations/{id}/taken", post(mark_donation_taken))
        .route("/account/confirm-password", post(confirm_password))
        .route("/account/settings", get(get_settings))
        .route("/account/password", put(change_password))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
