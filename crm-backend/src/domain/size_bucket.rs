// src/domain/size_bucket.rs
//! アカウント規模の 2 つの分類。
//!
//! - ユーザー数のしきい値による 5 区分（分析の demos-by-size 用）
//! - 保存されている規模カテゴリ名による 3 区分（リーダーボード用）
//!
//! 両者は独立しており、同じアカウントが別のバケットに入ることがある。

use serde::{Deserialize, Serialize};

/// ユーザー数による区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserCountBucket {
    None,
    Little,
    Small,
    Medium,
    Enterprise,
}

/// `≤0`（未設定を含む）→ none, `1–9` → little, `10–24` → small,
/// `25–49` → medium, `≥50` → enterprise
pub fn classify_by_user_count(number_of_users: Option<i32>) -> UserCountBucket {
    match number_of_users.unwrap_or(0) {
        i32::MIN..=0 => UserCountBucket::None,
        1..=9 => UserCountBucket::Little,
        10..=24 => UserCountBucket::Small,
        25..=49 => UserCountBucket::Medium,
        _ => UserCountBucket::Enterprise,
    }
}

/// demos-by-size のバケット別件数。none は外部に出さない
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSizeCounts {
    pub little: u64,
    pub small: u64,
    pub medium: u64,
    pub enterprise: u64,
}

impl DemoSizeCounts {
    pub fn with(self, bucket: UserCountBucket) -> Self {
        match bucket {
            UserCountBucket::None => self,
            UserCountBucket::Little => Self {
                little: self.little + 1,
                ..self
            },
            UserCountBucket::Small => Self {
                small: self.small + 1,
                ..self
            },
            UserCountBucket::Medium => Self {
                medium: self.medium + 1,
                ..self
            },
            UserCountBucket::Enterprise => Self {
                enterprise: self.enterprise + 1,
                ..self
            },
        }
    }
}

/// 投影済みのユーザー数を分類して集計する
pub fn tally_user_count_buckets<I>(numbers_of_users: I) -> DemoSizeCounts
where
    I: IntoIterator<Item = Option<i32>>,
{
    numbers_of_users
        .into_iter()
        .map(classify_by_user_count)
        .fold(DemoSizeCounts::default(), DemoSizeCounts::with)
}

/// 規模カテゴリ名による区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryBucket {
    Small,
    Medium,
    Enterprise,
}

/// 大文字小文字を区別せず medium / enterprise を判定し、それ以外
/// （未設定・不明な名前を含む）は small
pub fn classify_by_category_name(name: Option<&str>) -> CategoryBucket {
    match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
        Some("medium") => CategoryBucket::Medium,
        Some("enterprise") => CategoryBucket::Enterprise,
        _ => CategoryBucket::Small,
    }
}

/// 1 ユーザー分のデモ件数（カテゴリ名区分）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoBucketCounts {
    pub small: i64,
    pub medium: i64,
    pub enterprise: i64,
}

impl DemoBucketCounts {
    pub fn with(self, bucket: CategoryBucket) -> Self {
        match bucket {
            CategoryBucket::Small => Self {
                small: self.small + 1,
                ..self
            },
            CategoryBucket::Medium => Self {
                medium: self.medium + 1,
                ..self
            },
            CategoryBucket::Enterprise => Self {
                enterprise: self.enterprise + 1,
                ..self
            },
        }
    }

    pub fn total(&self) -> i64 {
        self.small + self.medium + self.enterprise
    }
}
