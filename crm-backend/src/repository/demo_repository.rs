// src/repository/demo_repository.rs

use super::{bounds_condition, scope_condition};
use crate::domain::account_model;
use crate::domain::account_size_model;
use crate::domain::date_range::{DateBounds, ResolvedRange};
use crate::domain::demo_model::{self, Entity as DemoEntity};
use crate::domain::demo_status::DemoStatus;
use crate::domain::visibility_scope::VisibilityScope;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QuerySelect, RelationTrait,
};
use uuid::Uuid;

/// 規模分類の入力だけを持つ投影（アカウントのユーザー数）
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct DemoUserCountRow {
    pub number_of_users: Option<i32>,
}

/// リーダーボード用の投影（設定者と規模カテゴリ名）
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LeaderboardDemoRow {
    pub aligned_by_user_id: Uuid,
    pub size_name: Option<String>,
}

pub struct DemoRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> DemoRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// 予定・完了デモのアカウントのユーザー数を返す
    ///
    /// 予定は scheduled_at、完了は done_at で期間判定する。それ以外の状態と、
    /// 削除済みデモおよび削除済みアカウントのデモは含めない。
    pub async fn find_account_user_counts(
        &self,
        scope: &VisibilityScope,
        bounds: &DateBounds,
    ) -> Result<Vec<DemoUserCountRow>, DbErr> {
        let status_window = Condition::any()
            .add(
                Condition::all()
                    .add(demo_model::Column::Status.eq(DemoStatus::Scheduled))
                    .add(bounds_condition(demo_model::Column::ScheduledAt, bounds)),
            )
            .add(
                Condition::all()
                    .add(demo_model::Column::Status.eq(DemoStatus::Completed))
                    .add(demo_model::Column::DoneAt.is_not_null())
                    .add(bounds_condition(demo_model::Column::DoneAt, bounds)),
            );

        DemoEntity::find()
            .select_only()
            .column_as(account_model::Column::NumberOfUsers, "number_of_users")
            .join(JoinType::InnerJoin, demo_model::Relation::Account.def())
            .filter(demo_model::Column::IsDeleted.eq(false))
            .filter(account_model::Column::IsDeleted.eq(false))
            .filter(scope_condition(
                &[
                    demo_model::Column::AlignedByUserId,
                    demo_model::Column::DoneByUserId,
                ],
                scope,
            ))
            .filter(status_window)
            .into_model::<DemoUserCountRow>()
            .all(self.db)
            .await
    }

    /// 期間内に完了したデモの設定者と規模カテゴリ名
    ///
    /// 規模カテゴリが欠けているアカウントは `size_name = None` になる。
    pub async fn find_completed_with_size_names(
        &self,
        range: &ResolvedRange,
    ) -> Result<Vec<LeaderboardDemoRow>, DbErr> {
        DemoEntity::find()
            .select_only()
            .column(demo_model::Column::AlignedByUserId)
            .column_as(account_size_model::Column::Name, "size_name")
            .join(JoinType::InnerJoin, demo_model::Relation::Account.def())
            .join(JoinType::LeftJoin, account_model::Relation::AccountSize.def())
            .filter(demo_model::Column::IsDeleted.eq(false))
            .filter(demo_model::Column::Status.eq(DemoStatus::Completed))
            .filter(demo_model::Column::DoneAt.between(range.start, range.end))
            .filter(account_model::Column::IsDeleted.eq(false))
            .into_model::<LeaderboardDemoRow>()
            .all(self.db)
            .await
    }
}
