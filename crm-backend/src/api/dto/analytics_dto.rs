// src/api/dto/analytics_dto.rs

use crate::domain::size_bucket::DemoSizeCounts;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// アナリティクス共通のクエリパラメータ
///
/// `from` / `to` は解釈できなければ無視される。`userIds` / `userId` は
/// 管理者のときだけ効く。
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    #[validate(length(max = 64, message = "from must be at most 64 characters"))]
    pub from: Option<String>,

    #[validate(length(max = 64, message = "to must be at most 64 characters"))]
    pub to: Option<String>,

    #[validate(length(max = 4096, message = "userIds must be at most 4096 characters"))]
    pub user_ids: Option<String>,

    #[validate(length(max = 64, message = "userId must be at most 64 characters"))]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummaryResponse {
    pub created: u64,
    pub modified: u64,
    pub booked: u64,
    pub lost: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemosBySizeResponse {
    pub little: u64,
    pub small: u64,
    pub medium: u64,
    pub enterprise: u64,
}

impl From<DemoSizeCounts> for DemosBySizeResponse {
    fn from(counts: DemoSizeCounts) -> Self {
        Self {
            little: counts.little,
            small: counts.small,
            medium: counts.medium,
            enterprise: counts.enterprise,
        }
    }
}
