// src/domain/visibility_scope.rs

use super::role::Role;
use uuid::Uuid;

/// 集計対象にできるユーザーの範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityScope {
    /// 全ユーザー（管理者のみ）
    Unrestricted,
    /// 指定ユーザーのみ。空にはならない
    Users(Vec<Uuid>),
}

impl VisibilityScope {
    /// ロールとクエリパラメータから可視範囲を決定する
    ///
    /// 一般ユーザーはパラメータに関係なく自分自身のみ。管理者は `userIds`
    /// （カンマ区切り、重複と不正な UUID は除外）、未指定なら `userId`。
    /// 有効な ID が残らなければ制限なし。
    pub fn resolve(
        role: Role,
        caller_id: Uuid,
        user_ids: Option<&str>,
        user_id: Option<&str>,
    ) -> Self {
        match role {
            Role::Basic => Self::Users(vec![caller_id]),
            Role::Admin => {
                // userIds が指定されていれば userId は見ない
                let listed = match user_ids.filter(|raw| !raw.trim().is_empty()) {
                    Some(raw) => parse_user_id_list(raw),
                    None => user_id
                        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
                        .into_iter()
                        .collect(),
                };

                if listed.is_empty() {
                    Self::Unrestricted
                } else {
                    Self::Users(listed)
                }
            }
        }
    }

    /// 制限がある場合のみ対象ユーザー一覧を返す
    pub fn user_ids(&self) -> Option<&[Uuid]> {
        match self {
            Self::Unrestricted => None,
            Self::Users(ids) => Some(ids),
        }
    }

    pub fn includes(&self, user_id: Uuid) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Users(ids) => ids.contains(&user_id),
        }
    }
}

fn parse_user_id_list(raw: &str) -> Vec<Uuid> {
    raw.split(',')
        .filter_map(|part| Uuid::parse_str(part.trim()).ok())
        .fold(Vec::new(), |mut ids, id| {
            if !ids.contains(&id) {
                ids.push(id);
            }
            ids
        })
}
