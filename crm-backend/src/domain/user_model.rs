// src/domain/user_model.rs

use super::role::Role;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 表示名が未設定のユーザーに使う名前
pub const FALLBACK_DISPLAY_NAME: &str = "(No name)";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    pub role: Role,

    pub is_active: bool,

    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_model::Entity")]
    Accounts,
}

impl Related<super::account_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            role: Set(Role::Basic),
            is_active: Set(true),
            is_deleted: Set(false),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            // 更新の場合のみ updated_at を更新
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

/// 空白のみの表示名も未設定として扱う。それ以外はそのまま返す
pub fn display_name_or_fallback(display_name: Option<&str>) -> String {
    match display_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => FALLBACK_DISPLAY_NAME.to_string(),
    }
}
