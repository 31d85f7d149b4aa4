use std::sync::Arc;

use axum::{extract::State, middleware, routing::post, Json, Router};
use charity_core::contact::{ContactForm, ContactReceipt};

use crate::{
    auth::{attach_session, MaybeSession},
    error::ApiResult,
    main_lib::AppState,
};

/// Forwards the message to the administrators; the sender may be anonymous.
async fn send_message(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Json(form): Json<ContactForm>,
) -> ApiResult<Json<ContactReceipt>> {
    let sender = session.as_ref().map(|s| &s.user);
    let receipt = state
        .contact_service
        .send_contact_message(sender, form)
        .await?;
    Ok(Json(receipt))
}

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", post(send_message))
        .route_layer(middleware::from_fn_with_state(state, attach_session))
}
