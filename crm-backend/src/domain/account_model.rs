// src/domain/account_model.rs

use super::deal_stage::DealStage;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub creator_user_id: Uuid,

    /// 規模カテゴリ名のルックアップ（ユーザー数由来のバケットとは独立）
    #[sea_orm(nullable)]
    pub account_size_id: Option<Uuid>,

    pub deal_stage: DealStage,

    #[sea_orm(nullable)]
    pub closed_at: Option<DateTime<Utc>>,

    #[sea_orm(nullable)]
    pub number_of_users: Option<i32>,

    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::CreatorUserId",
        to = "super::user_model::Column::Id"
    )]
    Creator,

    #[sea_orm(
        belongs_to = "super::account_size_model::Entity",
        from = "Column::AccountSizeId",
        to = "super::account_size_model::Column::Id"
    )]
    AccountSize,

    #[sea_orm(has_many = "super::demo_model::Entity")]
    Demos,
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::account_size_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountSize.def()
    }
}

impl Related<super::demo_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Demos.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            deal_stage: Set(DealStage::default()),
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
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}
