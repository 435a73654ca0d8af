// src/api/dto/leaderboard_dto.rs

use crate::domain::leaderboard::{LeaderboardEntry, ScoringRules};
use crate::domain::size_bucket::DemoBucketCounts;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    pub users: Vec<LeaderboardUserDto>,
    pub scoring: ScoringDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardUserDto {
    pub user_id: Uuid,
    pub name: String,
    pub accounts_created: i64,
    pub demos: DemoBucketsDto,
    pub points: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoBucketsDto {
    pub small: i64,
    pub medium: i64,
    pub enterprise: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringDto {
    pub account_created: i64,
    pub demo_small: i64,
    pub demo_medium: i64,
    pub demo_enterprise: i64,
}

impl From<DemoBucketCounts> for DemoBucketsDto {
    fn from(counts: DemoBucketCounts) -> Self {
        Self {
            small: counts.small,
            medium: counts.medium,
            enterprise: counts.enterprise,
        }
    }
}

impl From<LeaderboardEntry> for LeaderboardUserDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id,
            name: entry.name,
            accounts_created: entry.accounts_created,
            demos: entry.demos.into(),
            points: entry.points,
        }
    }
}

impl From<ScoringRules> for ScoringDto {
    fn from(rules: ScoringRules) -> Self {
        Self {
            account_created: rules.account_created,
            demo_small: rules.demo_small,
            demo_medium: rules.demo_medium,
            demo_enterprise: rules.demo_enterprise,
        }
    }
}
