// src/error.rs

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

// 重複キーや型違いのクエリも VALIDATION_ERROR として返す
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl AppError {
    /// クライアントに返すエラーコード
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DbErr(_) => "INTERNAL_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidPeriod(_) => "INVALID_PERIOD",
            AppError::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            AppError::ValidationFailure(_) | AppError::InvalidQuery(_) => "VALIDATION_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidPeriod(_)
            | AppError::InvalidDateRange(_)
            | AppError::ValidationFailure(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::DbErr(db_err) => {
                // サーバーログには詳細を出す
                error!(error = ?db_err, "Database error");
                "A database error occurred".to_string()
            }
            AppError::ValidationFailure(errors) => validation_message(errors),
            AppError::Unauthorized(message)
            | AppError::InvalidPeriod(message)
            | AppError::InvalidDateRange(message)
            | AppError::InvalidQuery(message) => message.clone(),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let detail = e
                    .message
                    .as_ref()
                    .map_or_else(|| "Invalid value".to_string(), |m| m.to_string());
                format!("{}: {}", field, detail)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
