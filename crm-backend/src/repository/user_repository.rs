// src/repository/user_repository.rs

use crate::domain::user_model::{self, Entity as UserEntity};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

/// リーダーボード候補ユーザーの投影
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserNameRow {
    pub id: Uuid,
    pub display_name: Option<String>,
}

pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> UserRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// 有効かつ未削除のユーザー（ID 昇順）
    pub async fn find_active_user_names(&self) -> Result<Vec<UserNameRow>, DbErr> {
        UserEntity::find()
            .select_only()
            .column(user_model::Column::Id)
            .column(user_model::Column::DisplayName)
            .filter(user_model::Column::IsActive.eq(true))
            .filter(user_model::Column::IsDeleted.eq(false))
            .order_by_asc(user_model::Column::Id)
            .into_model::<UserNameRow>()
            .all(self.db)
            .await
    }
}
