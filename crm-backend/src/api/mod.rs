// src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::{cors_layer, jwt_auth_middleware, AuthMiddlewareConfig};
use crate::service::{
    analytics_service::AnalyticsService, leaderboard_service::LeaderboardService,
};
use crate::utils::jwt::JwtManager;
use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub mod dto;
pub mod handlers;

use handlers::{analytics_handler, leaderboard_handler, system_handler};

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<AnalyticsService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbPool, jwt_manager: Arc<JwtManager>, config: AppConfig) -> Self {
        Self {
            analytics_service: Arc::new(AnalyticsService::new(db.clone())),
            leaderboard_service: Arc::new(LeaderboardService::new(db)),
            jwt_manager,
            config: Arc::new(config),
        }
    }
}

/// 全ルーターを統合したアプリケーションを構築する
///
/// `/api` 以下は認証必須。`/health` は認証なし。
pub fn create_app(app_state: AppState) -> Router {
    let auth_config = AuthMiddlewareConfig::new(app_state.jwt_manager.clone());
    let config = app_state.config.clone();

    let protected = Router::new()
        .merge(leaderboard_handler::leaderboard_router(app_state.clone()))
        .merge(analytics_handler::analytics_router(app_state.clone()))
        .layer(axum_middleware::from_fn_with_state(
            auth_config,
            jwt_auth_middleware,
        ));

    // レイヤーは後に追加したものが外側
    Router::new()
        .merge(system_handler::system_router(app_state))
        .nest("/api", protected)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn(inject_request_context))
        .layer(TimeoutLayer::new(config.server.request_timeout))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
