mod account;
mod admin;
mod contact;
mod donations;
mod health;
mod landing;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    auth::{attach_session, login, logout, register, require_session, session_status},
    config::Config,
    main_lib::AppState,
};

fn auth_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let with_session = Router::new()
        .route("/auth/session", get(session_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));
    let with_optional_session = Router::new()
        .route("/auth/logout", post(logout).get(logout))
        .route_layer(middleware::from_fn_with_state(state, attach_session));

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(with_session)
        .merge(with_optional_session)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins).allow_credentials(true)
    };

    let api = Router::new()
        .merge(health::router())
        .merge(landing::router())
        .merge(auth_router(state.clone()))
        .merge(donations::router(state.clone()))
        .merge(account::router(state.clone()))
        .merge(contact::router(state.clone()))
        .merge(admin::router(state.clone()));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
