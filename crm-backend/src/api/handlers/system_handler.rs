use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::{api::AppState, types::ApiResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_check() -> ApiResponse<HealthResponse> {
    ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
    })
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(app_state)
}
