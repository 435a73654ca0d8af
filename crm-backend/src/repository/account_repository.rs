// src/repository/account_repository.rs

use super::{bounds_condition, scope_condition};
use crate::domain::account_model::{self, Entity as AccountEntity};
use crate::domain::date_range::{DateBounds, ResolvedRange};
use crate::domain::deal_stage::DealStage;
use crate::domain::visibility_scope::VisibilityScope;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QuerySelect, Select,
};
use uuid::Uuid;

/// 作成者ごとのアカウント作成数
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct CreatorCountRow {
    pub creator_user_id: Uuid,
    pub account_count: i64,
}

pub struct AccountRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> AccountRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// 未削除かつ可視範囲内のアカウント
    fn scoped(scope: &VisibilityScope) -> Select<AccountEntity> {
        AccountEntity::find()
            .filter(account_model::Column::IsDeleted.eq(false))
            .filter(scope_condition(
                &[account_model::Column::CreatorUserId],
                scope,
            ))
    }

    pub async fn count_created(
        &self,
        scope: &VisibilityScope,
        bounds: &DateBounds,
    ) -> Result<u64, DbErr> {
        Self::scoped(scope)
            .filter(bounds_condition(account_model::Column::CreatedAt, bounds))
            .count(self.db)
            .await
    }

    pub async fn count_modified(
        &self,
        scope: &VisibilityScope,
        bounds: &DateBounds,
    ) -> Result<u64, DbErr> {
        Self::scoped(scope)
            .filter(bounds_condition(account_model::Column::UpdatedAt, bounds))
            .count(self.db)
            .await
    }

    /// 指定ステージでクローズ済み（closed_at あり）のアカウント数
    pub async fn count_closed(
        &self,
        scope: &VisibilityScope,
        stage: DealStage,
        bounds: &DateBounds,
    ) -> Result<u64, DbErr> {
        Self::scoped(scope)
            .filter(account_model::Column::DealStage.eq(stage))
            .filter(account_model::Column::ClosedAt.is_not_null())
            .filter(bounds_condition(account_model::Column::ClosedAt, bounds))
            .count(self.db)
            .await
    }

    /// 期間内に作成されたアカウント数を作成者ごとに数える（全ユーザー対象）
    pub async fn count_created_by_creator(
        &self,
        range: &ResolvedRange,
    ) -> Result<Vec<CreatorCountRow>, DbErr> {
        Self::scoped(&VisibilityScope::Unrestricted)
            .select_only()
            .column(account_model::Column::CreatorUserId)
            .column_as(
                Expr::col((AccountEntity, account_model::Column::Id)).count(),
                "account_count",
            )
            .filter(account_model::Column::CreatedAt.between(range.start, range.end))
            .group_by(account_model::Column::CreatorUserId)
            .into_model::<CreatorCountRow>()
            .all(self.db)
            .await
    }
}
