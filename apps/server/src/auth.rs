//! Cookie/bearer sessions backed by signed JWTs.
//!
//! A session token names the user and the `session_version` it was issued
//! for; bumping the version on the user row (password change) invalidates
//! every token issued before. Confirming the password re-issues the token
//! with an `elv` deadline that unlocks the account settings endpoints.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use charity_core::errors::AuthError as CoreAuthError;
use charity_core::users::{LoginForm, RegisterForm, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

pub const SESSION_COOKIE: &str = "charity_session";

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub session_ttl: Duration,
    pub confirm_ttl: Duration,
    pub cookie_secure: bool,
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    session_ttl: Duration,
    confirm_ttl: Duration,
    cookie_secure: bool,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    Forbidden(String),
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    ver: i32,
    exp: usize,
    iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elv: Option<usize>,
}

/// The authenticated user of the current request.
#[derive(Clone, Debug)]
pub struct Session {
    pub user: User,
    /// Whether the password was re-confirmed recently enough for settings changes.
    pub confirmed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    pub confirmed: bool,
}

fn now_secs() -> Result<Duration, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.jwt_secret);
        let decoding_key = DecodingKey::from_secret(&config.jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key,
            decoding_key,
            validation,
            session_ttl: config.session_ttl,
            confirm_ttl: config.confirm_ttl,
            cookie_secure: config.cookie_secure,
        }
    }

    /// Signs a session for `user`; `confirmed` opens the settings window.
    pub fn issue_token(&self, user: &User, confirmed: bool) -> Result<String, AuthError> {
        let now = now_secs()?;
        let exp = now + self.session_ttl;
        let claims = Claims {
            sub: user.id.clone(),
            ver: user.session_version,
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
            elv: confirmed.then(|| (now + self.confirm_ttl).as_secs() as usize),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("Rejected session token: {:?}", err.kind());
                AuthError::Unauthorized
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.session_ttl
    }

    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            self.session_ttl.as_secs()
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn clear_cookie(&self) -> String {
        let mut cookie = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0");
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AuthError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".into()),
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// Bearer header first, then the session cookie.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let mut parts = value.splitn(2, ' ');
        if let (Some(scheme), Some(token)) = (parts.next(), parts.next()) {
            let token = token.trim();
            if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Resolves the request's token to a live session.
fn resolve_session(state: &AppState, headers: &HeaderMap) -> Result<Session, AuthError> {
    let token = token_from_headers(headers).ok_or(AuthError::Unauthorized)?;
    let claims = state.auth.validate_token(&token)?;

    let user = match state.user_service.get_user(&claims.sub) {
        Ok(user) => user,
        Err(e) if e.is_not_found() => return Err(AuthError::Unauthorized),
        Err(e) => return Err(AuthError::Internal(e.to_string())),
    };
    if !user.is_active || user.session_version != claims.ver {
        return Err(AuthError::Unauthorized);
    }

    let now = now_secs()?.as_secs() as usize;
    let confirmed = claims.elv.is_some_and(|deadline| deadline > now);
    Ok(Session { user, confirmed })
}

/// Rejects requests without a valid session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let session = resolve_session(&state, request.headers())?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Attaches the session when one is present; anonymous requests pass through.
pub async fn attach_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match resolve_session(&state, request.headers()) {
        Ok(session) => {
            request.extensions_mut().insert(session);
        }
        Err(AuthError::Internal(msg)) => tracing::warn!("Session lookup failed: {}", msg),
        Err(_) => {}
    }
    next.run(request).await
}

/// Admits superusers only. Layered inside `require_session`.
pub async fn require_superuser(request: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let is_superuser = request
        .extensions()
        .get::<Session>()
        .map(|s| s.user.is_superuser)
        .ok_or(AuthError::Unauthorized)?;
    if !is_superuser {
        return Err(AuthError::Forbidden("Administrator access required".into()));
    }
    Ok(next.run(request).await)
}

/// Extractor for routes behind `require_session`.
pub struct CurrentSession(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AuthError::Unauthorized)
    }
}

/// Extractor for routes behind `attach_session`.
pub struct MaybeSession(pub Option<Session>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(parts.extensions.get::<Session>().cloned()))
    }
}

impl CurrentSession {
    /// Fails unless the password was confirmed within the configured window.
    pub fn require_confirmed(&self) -> Result<&User, AuthError> {
        if self.0.confirmed {
            Ok(&self.0.user)
        } else {
            Err(AuthError::Forbidden(
                "Confirm your password to change account settings".into(),
            ))
        }
    }
}

fn login_response(state: &AppState, user: User, confirmed: bool) -> ApiResult<Response> {
    let token = state.auth.issue_token(&user, confirmed)?;
    let cookie = state.auth.session_cookie(&token);
    let body = LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
        user,
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegisterForm>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.user_service.register(form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginForm>,
) -> ApiResult<Response> {
    let user = state.user_service.authenticate(form).await?;
    tracing::info!("User {} logged in", user.id);
    login_response(&state, user, false)
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
) -> Response {
    if let Some(session) = session {
        tracing::info!("User {} logged out", session.user.id);
    }
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, state.auth.clear_cookie())],
    )
        .into_response()
}

pub async fn session_status(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: session.user,
        confirmed: session.confirmed,
    })
}

#[derive(Deserialize)]
pub struct ConfirmPasswordRequest {
    #[serde(default)]
    pub password: String,
}

/// Re-issues the session with the settings window open.
pub async fn confirm_password(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<ConfirmPasswordRequest>,
) -> ApiResult<Response> {
    state
        .user_service
        .confirm_password(&session.user, &payload.password)
        .map_err(|e| match e {
            charity_core::Error::Auth(CoreAuthError::InvalidCredentials) => {
                ApiError::Forbidden("Incorrect password".into())
            }
            other => ApiError::from(other),
        })?;
    login_response(&state, session.user, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_decode_secret_key_accepts_base64_and_ascii() {
        let b64 = BASE64.encode([7u8; 32]);
        assert_eq!(decode_secret_key(&b64).unwrap(), vec![7u8; 32]);
        assert!(decode_secret_key("0123456789abcdef0123456789abcdef!").is_err());
        assert!(decode_secret_key("   ").is_err());
    }

    #[test]
    fn test_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; charity_session=abc.def.ghi"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_missing_or_empty_cookie_yields_nothing() {
        let mut headers = HeaderMap::new();
        assert!(token_from_headers(&headers).is_none());
        headers.insert(COOKIE, HeaderValue::from_static("charity_session="));
        assert!(token_from_headers(&headers).is_none());
    }
}
