// src/middleware/auth.rs

use crate::domain::role::Role;
use crate::error::AppError;
use crate::utils::jwt::JwtManager;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use uuid::Uuid;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// JWT認証ミドルウェアの設定
#[derive(Clone)]
pub struct AuthMiddlewareConfig {
    pub jwt_manager: Arc<JwtManager>,
    pub access_token_cookie_name: String,
}

impl AuthMiddlewareConfig {
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            jwt_manager,
            access_token_cookie_name: ACCESS_TOKEN_COOKIE.to_string(),
        }
    }
}

/// リクエストの呼び出し元（認証済み）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentIdentity {
    pub user_id: Uuid,
    pub role: Role,
}

/// JWT認証ミドルウェア
///
/// 検証に成功した呼び出し元をリクエストとレスポンスの拡張に載せる。
pub async fn jwt_auth_middleware(
    State(config): State<AuthMiddlewareConfig>,
    headers: HeaderMap,
    cookie_jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = extract_token(&headers, &cookie_jar, &config.access_token_cookie_name)
        .ok_or_else(|| {
            warn!(path = %path, "Missing authentication token");
            AppError::Unauthorized("Authentication required".to_string())
        })?;

    let claims = config
        .jwt_manager
        .verify_access_token(&token)
        .map_err(|e| {
            warn!(path = %path, error = %e, "Access token verification failed");
            AppError::Unauthorized("Invalid or expired access token".to_string())
        })?;

    let identity = CurrentIdentity {
        user_id: claims.sub,
        role: claims.role,
    };

    request.extensions_mut().insert(identity);
    let mut response = next.run(request).await;
    response.extensions_mut().insert(identity);

    Ok(response)
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentIdentity>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// CORS設定
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true) // Cookie送信を許可
        .max_age(Duration::from_secs(3600))
}

fn extract_token(headers: &HeaderMap, cookie_jar: &CookieJar, cookie_name: &str) -> Option<String> {
    // Authorization ヘッダーからトークンを取得
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    // Cookieからトークンを取得（フォールバック）
    let cookie_token = cookie_jar
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string());

    auth_header.or(cookie_token)
}
