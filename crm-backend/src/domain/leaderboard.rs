// src/domain/leaderboard.rs
//! リーダーボードの採点と並び替え。DB から取得済みの投影だけを入力にとる純粋関数。

use super::size_bucket::{classify_by_category_name, DemoBucketCounts};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// 採点ルール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    pub account_created: i64,
    pub demo_small: i64,
    pub demo_medium: i64,
    pub demo_enterprise: i64,
}

pub const SCORING: ScoringRules = ScoringRules {
    account_created: 2,
    demo_small: 2,
    demo_medium: 3,
    demo_enterprise: 5,
};

impl ScoringRules {
    pub fn points(&self, accounts_created: i64, demos: &DemoBucketCounts) -> i64 {
        accounts_created * self.account_created
            + demos.small * self.demo_small
            + demos.medium * self.demo_medium
            + demos.enterprise * self.demo_enterprise
    }
}

/// 採点対象ユーザー（有効かつ未削除）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardCandidate {
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub accounts_created: i64,
    pub demos: DemoBucketCounts,
    pub points: i64,
}

/// 完了デモを設定者ごとにカテゴリ名で分類して数える
///
/// `eligible` に含まれない設定者のデモは誰の得点にもならない。
pub fn tally_demo_buckets<'a, I>(
    demos: I,
    eligible: &HashSet<Uuid>,
) -> HashMap<Uuid, DemoBucketCounts>
where
    I: IntoIterator<Item = (Uuid, Option<&'a str>)>,
{
    demos
        .into_iter()
        .filter(|(aligned_by, _)| eligible.contains(aligned_by))
        .fold(HashMap::new(), |mut tally, (aligned_by, size_name)| {
            let bucket = classify_by_category_name(size_name);
            let counts = tally.get(&aligned_by).copied().unwrap_or_default();
            tally.insert(aligned_by, counts.with(bucket));
            tally
        })
}

/// 得点を計算し、0 点以下を除外して並び替える
///
/// 並び順: 得点の降順、デモ合計の降順、名前の昇順（序数比較）、ユーザー ID。
pub fn score_leaderboard(
    candidates: Vec<LeaderboardCandidate>,
    accounts_created: &HashMap<Uuid, i64>,
    demos: &HashMap<Uuid, DemoBucketCounts>,
    rules: &ScoringRules,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = candidates
        .into_iter()
        .map(|candidate| {
            let accounts = accounts_created
                .get(&candidate.user_id)
                .copied()
                .unwrap_or(0);
            let buckets = demos.get(&candidate.user_id).copied().unwrap_or_default();
            LeaderboardEntry {
                points: rules.points(accounts, &buckets),
                user_id: candidate.user_id,
                name: candidate.name,
                accounts_created: accounts,
                demos: buckets,
            }
        })
        .filter(|entry| entry.points > 0)
        .collect();

    entries.sort_by(compare_entries);
    entries
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.demos.total().cmp(&a.demos.total()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.user_id.cmp(&b.user_id))
}
