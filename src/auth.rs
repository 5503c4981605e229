//! # Authentication and Authorization
//!
//! Validates JWT bearer tokens on protected API endpoints and resolves the
//! per-request [`TenantContext`] from the verified claims. Absent or
//! malformed claims yield 401; callers never fall back to an implicit
//! admin context.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized};
use crate::models::user::ROLE_SYSTEM_ADMIN;
use crate::server::AppState;
use crate::tenant::TenantContext;

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Acting user id
    pub sub: Uuid,
    /// Owning organization; absent for system admins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<Uuid>,
    /// Role name, see [`crate::models::user`]
    pub role: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware: validates the bearer JWT and stashes the
/// resolved tenant context in request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = decode_claims(&config, token)?;
    let context = context_from_claims(&claims)?;

    tracing::debug!(user_id = %context.user_id, system_admin = context.is_system_admin, "authenticated request");

    let mut request = request;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(Some("Missing Authorization header")))
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| unauthorized(Some("Invalid Authorization header")))
        })
        .and_then(|header| {
            header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized(Some("Authorization header must use Bearer scheme")))
        })
}

fn decode_claims(config: &AppConfig, token: &str) -> Result<Claims, ApiError> {
    let secret = config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| unauthorized(Some("Authentication is not configured")))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized(Some("Invalid bearer token")))
}

/// Maps verified claims onto a tenant context. System admins carry no
/// organization; any other token must name one or it is rejected.
fn context_from_claims(claims: &Claims) -> Result<TenantContext, ApiError> {
    if claims.role == ROLE_SYSTEM_ADMIN {
        Ok(TenantContext::system_admin(claims.sub))
    } else {
        let org = claims
            .org
            .ok_or_else(|| unauthorized(Some("Token carries no organization")))?;
        Ok(TenantContext::member(claims.sub, org))
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| unauthorized(Some("Authentication required")))
    }
}
