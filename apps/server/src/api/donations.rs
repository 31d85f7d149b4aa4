use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use charity_core::{
    categories::Category,
    donations::{Donation, DonationForm},
    institutions::Institution,
};
use serde::Serialize;

use crate::{
    auth::{require_session, CurrentSession},
    error::ApiResult,
    main_lib::AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DonationFormPage {
    institutions: Vec<Institution>,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct ConfirmationPage {
    message: &'static str,
}

/// Choices offered by the donation form.
async fn get_donation_form(
    State(state): State<Arc<AppState>>,
    CurrentSession(_session): CurrentSession,
) -> ApiResult<Json<DonationFormPage>> {
    Ok(Json(DonationFormPage {
        institutions: state.institution_service.get_institutions()?,
        categories: state.category_service.get_categories()?,
    }))
}

async fn create_donation(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<DonationForm>,
) -> ApiResult<(StatusCode, Json<Donation>)> {
    let donation = state
        .donation_service
        .create_donation(&session.user, form)
        .await?;
    tracing::info!(
        "User {} requested pickup {} of {} bag(s)",
        session.user.id,
        donation.id,
        donation.quantity
    );
    Ok((StatusCode::CREATED, Json(donation)))
}

async fn get_confirmation() -> Json<ConfirmationPage> {
    Json(ConfirmationPage {
        message: "Thank you for your donation. A courier will contact you to arrange the pickup.",
    })
}

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/donations/form", get(get_donation_form))
        .route("/donations", post(create_donation))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/donations/confirmation", get(get_confirmation))
        .merge(protected)
}
