// src/repository/mod.rs
pub mod account_repository;
pub mod demo_repository;
pub mod user_repository;

use crate::domain::date_range::DateBounds;
use crate::domain::visibility_scope::VisibilityScope;
use sea_orm::{ColumnTrait, Condition};

/// 指定された側だけを適用する閉区間条件
pub(crate) fn bounds_condition<C>(column: C, bounds: &DateBounds) -> Condition
where
    C: ColumnTrait,
{
    let mut condition = Condition::all();
    if let Some(from) = bounds.from {
        condition = condition.add(column.gte(from));
    }
    if let Some(to) = bounds.to {
        condition = condition.add(column.lte(to));
    }
    condition
}

/// いずれかのカラムが可視範囲内のユーザーであれば一致する条件
pub(crate) fn scope_condition<C>(columns: &[C], scope: &VisibilityScope) -> Condition
where
    C: ColumnTrait,
{
    match scope.user_ids() {
        None => Condition::all(),
        Some(ids) => columns.iter().fold(Condition::any(), |condition, column| {
            condition.add(column.is_in(ids.iter().copied()))
        }),
    }
}
