// src/service/leaderboard_service.rs

use crate::api::dto::leaderboard_dto::{LeaderboardResponse, LeaderboardUserDto};
use crate::db::{self, DbPool};
use crate::domain::date_range::resolve_period;
use crate::domain::leaderboard::{
    score_leaderboard, tally_demo_buckets, LeaderboardCandidate, SCORING,
};
use crate::domain::period::Period;
use crate::domain::user_model::display_name_or_fallback;
use crate::error::AppResult;
use crate::repository::account_repository::AccountRepository;
use crate::repository::demo_repository::DemoRepository;
use crate::repository::user_repository::UserRepository;
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// 期間ごとのユーザー得点ランキング。呼び出し元のロールに関係なく全ユーザーが対象
#[derive(Clone)]
pub struct LeaderboardService {
    db: DbPool,
}

impl LeaderboardService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn leaderboard(&self, period: Period) -> AppResult<LeaderboardResponse> {
        // DB の精度（マイクロ秒）に揃える
        self.leaderboard_at(period, Utc::now().trunc_subsecs(6)).await
    }

    /// `now` を基準に期間を解決してランキングを作る
    pub async fn leaderboard_at(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> AppResult<LeaderboardResponse> {
        let range = resolve_period(period, now);

        let txn = db::begin_read_snapshot(&self.db).await?;
        let users = UserRepository::new(&txn).find_active_user_names().await?;
        let created = AccountRepository::new(&txn)
            .count_created_by_creator(&range)
            .await?;
        let demos = DemoRepository::new(&txn)
            .find_completed_with_size_names(&range)
            .await?;
        txn.commit().await?;

        let candidates: Vec<LeaderboardCandidate> = users
            .into_iter()
            .map(|user| LeaderboardCandidate {
                user_id: user.id,
                name: display_name_or_fallback(user.display_name.as_deref()),
            })
            .collect();
        let eligible: HashSet<Uuid> = candidates.iter().map(|c| c.user_id).collect();

        // 無効・不明ユーザーの分は捨てる
        let accounts_created: HashMap<Uuid, i64> = created
            .into_iter()
            .filter(|row| eligible.contains(&row.creator_user_id))
            .map(|row| (row.creator_user_id, row.account_count))
            .collect();
        let demo_count = demos.len();
        let demo_buckets = tally_demo_buckets(
            demos
                .iter()
                .map(|row| (row.aligned_by_user_id, row.size_name.as_deref())),
            &eligible,
        );

        let entries = score_leaderboard(candidates, &accounts_created, &demo_buckets, &SCORING);

        debug!(
            period = %period,
            start = %range.start,
            end = %range.end,
            candidates = eligible.len(),
            completed_demos = demo_count,
            ranked = entries.len(),
            "Leaderboard computed"
        );

        Ok(LeaderboardResponse {
            period: period.as_str().to_string(),
            start_date: range.start_date().format("%Y-%m-%d").to_string(),
            end_date: range.end_date().format("%Y-%m-%d").to_string(),
            users: entries.into_iter().map(LeaderboardUserDto::from).collect(),
            scoring: SCORING.into(),
        })
    }
}
