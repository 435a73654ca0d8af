// src/domain/demo_status.rs

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// デモの状態。done_at は Completed のときのみ設定される
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DemoStatus {
    #[sea_orm(string_value = "Scheduled")]
    Scheduled,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    #[sea_orm(string_value = "NoShow")]
    NoShow,
}

impl Default for DemoStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}
