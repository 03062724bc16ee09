use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::user::LoggedinUser;
use serde::{Deserialize, Serialize};
use service::toy_service::ToyService;
use tracing::warn;

use crate::errors::JsonApiError;

/// Cookie carrying the session token when no `Authorization` header is sent.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub toys: Arc<ToyService>,
    pub auth: ServerAuthConfig,
}

/// Token claims: the logged-in user plus expiry.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    user: LoggedinUser,
    exp: usize,
}

/// Sign a session token for `user` valid for `ttl_secs` seconds.
pub fn issue_token(user: &LoggedinUser, secret: &str, ttl_secs: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now().timestamp() + ttl_secs).max(0) as usize;
    let claims = Claims { user: user.clone(), exp };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Verify a session token and return the user it was issued for.
pub fn verify_token(token: &str, secret: &str) -> Result<LoggedinUser, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &key, &validation).map(|data| data.claims.user)
}

/// Bearer token first, then the `auth_token` cookie.
fn token_from_parts(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    bearer
        .or_else(|| CookieJar::from_headers(&parts.headers).get(AUTH_COOKIE).map(|c| c.value().to_string()))
        .filter(|t| !t.is_empty())
}

/// Extractor for routes that need a logged-in actor; rejects with 401.
pub struct AuthUser(pub LoggedinUser);

#[axum::async_trait]
impl FromRequestParts<ServerState> for AuthUser {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let token = match token_from_parts(parts) {
            Some(t) => t,
            None => {
                warn!(path = %path, "missing Authorization header and auth_token cookie");
                return Err(JsonApiError::unauthorized("login required"));
            }
        };
        match verify_token(&token, &state.auth.jwt_secret) {
            Ok(user) => Ok(AuthUser(user)),
            Err(e) => {
                warn!(path = %path, error = %e, "invalid session token");
                Err(JsonApiError::unauthorized("invalid or expired token"))
            }
        }
    }
}
