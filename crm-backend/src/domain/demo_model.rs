// src/domain/demo_model.rs

use super::demo_status::DemoStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "demos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub account_id: Uuid,

    /// デモを設定したユーザー（リーダーボードの採点対象）
    pub aligned_by_user_id: Uuid,

    /// デモを実施したユーザー
    #[sea_orm(nullable)]
    pub done_by_user_id: Option<Uuid>,

    pub status: DemoStatus,

    pub scheduled_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub done_at: Option<DateTime<Utc>>,

    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_model::Entity",
        from = "Column::AccountId",
        to = "super::account_model::Column::Id"
    )]
    Account,
}

impl Related<super::account_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            status: Set(DemoStatus::default()),
            scheduled_at: Set(now),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}
