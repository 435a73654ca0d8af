// src/api/handlers/leaderboard_handler.rs

use crate::api::dto::leaderboard_dto::{LeaderboardQuery, LeaderboardResponse};
use crate::api::AppState;
use crate::domain::period::Period;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentIdentity;
use crate::types::ApiResponse;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use tracing::warn;

/// 期間別リーダーボード（全ユーザー対象）
pub async fn get_leaderboard_handler(
    State(app_state): State<AppState>,
    identity: CurrentIdentity,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> AppResult<ApiResponse<LeaderboardResponse>> {
    let Query(query) = query?;
    let period = parse_period(query.period.as_deref()).inspect_err(|_| {
        warn!(
            user_id = %identity.user_id,
            period = ?query.period,
            "Invalid leaderboard period"
        );
    })?;

    let leaderboard = app_state.leaderboard_service.leaderboard(period).await?;
    Ok(ApiResponse::success(leaderboard))
}

fn parse_period(raw: Option<&str>) -> AppResult<Period> {
    raw.and_then(Period::from_str).ok_or_else(|| {
        AppError::InvalidPeriod(
            "period must be one of: weekly, monthly, quarterly".to_string(),
        )
    })
}

pub fn leaderboard_router(app_state: AppState) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard_handler))
        .with_state(app_state)
}
