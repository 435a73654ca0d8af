// src/service/analytics_service.rs

use crate::api::dto::analytics_dto::{
    AccountSummaryResponse, AnalyticsQuery, DemosBySizeResponse,
};
use crate::db::{self, DbPool};
use crate::domain::date_range::{parse_bounds, DateBounds};
use crate::domain::deal_stage::DealStage;
use crate::domain::size_bucket::tally_user_count_buckets;
use crate::domain::visibility_scope::VisibilityScope;
use crate::error::AppResult;
use crate::middleware::auth::CurrentIdentity;
use crate::repository::account_repository::AccountRepository;
use crate::repository::demo_repository::DemoRepository;
use tracing::debug;

/// アカウント・デモの集計
#[derive(Clone)]
pub struct AnalyticsService {
    db: DbPool,
}

impl AnalyticsService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 入力の検証と可視範囲の決定。DB に触れる前に行う
    fn prepare(
        identity: &CurrentIdentity,
        query: &AnalyticsQuery,
    ) -> AppResult<(DateBounds, VisibilityScope)> {
        let bounds = parse_bounds(query.from.as_deref(), query.to.as_deref())?;
        let scope = VisibilityScope::resolve(
            identity.role,
            identity.user_id,
            query.user_ids.as_deref(),
            query.user_id.as_deref(),
        );
        Ok((bounds, scope))
    }

    /// 作成・更新・成約・失注の件数
    ///
    /// 期間指定がない場合は通算値で、modified は created と同じ値になる。
    pub async fn account_summary(
        &self,
        identity: &CurrentIdentity,
        query: &AnalyticsQuery,
    ) -> AppResult<AccountSummaryResponse> {
        let (bounds, scope) = Self::prepare(identity, query)?;

        let txn = db::begin_read_snapshot(&self.db).await?;
        let repo = AccountRepository::new(&txn);

        let created = repo.count_created(&scope, &bounds).await?;
        let modified = if bounds.is_unbounded() {
            created
        } else {
            repo.count_modified(&scope, &bounds).await?
        };
        let booked = repo.count_closed(&scope, DealStage::Won, &bounds).await?;
        let lost = repo.count_closed(&scope, DealStage::Lost, &bounds).await?;
        txn.commit().await?;

        debug!(
            user_id = %identity.user_id,
            scoped_users = ?scope.user_ids().map(|ids| ids.len()),
            created,
            modified,
            booked,
            lost,
            "Account summary computed"
        );

        Ok(AccountSummaryResponse {
            created,
            modified,
            booked,
            lost,
        })
    }

    /// 予定・完了デモをアカウントのユーザー数で分類した件数
    pub async fn demos_by_size(
        &self,
        identity: &CurrentIdentity,
        query: &AnalyticsQuery,
    ) -> AppResult<DemosBySizeResponse> {
        let (bounds, scope) = Self::prepare(identity, query)?;

        let txn = db::begin_read_snapshot(&self.db).await?;
        let rows = DemoRepository::new(&txn)
            .find_account_user_counts(&scope, &bounds)
            .await?;
        txn.commit().await?;

        let counts = tally_user_count_buckets(rows.into_iter().map(|row| row.number_of_users));

        debug!(
            user_id = %identity.user_id,
            scoped_users = ?scope.user_ids().map(|ids| ids.len()),
            little = counts.little,
            small = counts.small,
            medium = counts.medium,
            enterprise = counts.enterprise,
            "Demos by size computed"
        );

        Ok(counts.into())
    }
}
