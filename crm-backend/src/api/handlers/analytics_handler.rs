// src/api/handlers/analytics_handler.rs

use crate::api::dto::analytics_dto::{
    AccountSummaryResponse, AnalyticsQuery, DemosBySizeResponse,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentIdentity;
use crate::types::ApiResponse;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use tracing::warn;
use validator::Validate;

/// アカウントの作成・更新・成約・失注件数
pub async fn get_account_summary_handler(
    State(app_state): State<AppState>,
    identity: CurrentIdentity,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> AppResult<ApiResponse<AccountSummaryResponse>> {
    let Query(query) = query?;
    validate_query(&identity, &query)?;

    let summary = app_state
        .analytics_service
        .account_summary(&identity, &query)
        .await?;
    Ok(ApiResponse::success(summary))
}

/// 予定・完了デモの規模別件数
pub async fn get_demos_by_size_handler(
    State(app_state): State<AppState>,
    identity: CurrentIdentity,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> AppResult<ApiResponse<DemosBySizeResponse>> {
    let Query(query) = query?;
    validate_query(&identity, &query)?;

    let counts = app_state
        .analytics_service
        .demos_by_size(&identity, &query)
        .await?;
    Ok(ApiResponse::success(counts))
}

fn validate_query(identity: &CurrentIdentity, query: &AnalyticsQuery) -> AppResult<()> {
    query.validate().map_err(|errors| {
        warn!(
            user_id = %identity.user_id,
            "Analytics query validation failed: {}",
            errors
        );
        errors.into()
    })
}

pub fn analytics_router(app_state: AppState) -> Router {
    Router::new()
        .route("/analytics/accounts", get(get_account_summary_handler))
        .route("/analytics/demos-by-size", get(get_demos_by_size_handler))
        .with_state(app_state)
}
