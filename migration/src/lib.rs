// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users_table;
mod m20250801_000002_create_account_sizes_table;
mod m20250801_000003_create_accounts_table;
mod m20250801_000004_create_demos_table;
mod m20250802_000001_add_aggregation_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 依存関係のないテーブル
            Box::new(m20250801_000001_create_users_table::Migration),
            Box::new(m20250801_000002_create_account_sizes_table::Migration),
            // 2. 外部キーを持つテーブル
            Box::new(m20250801_000003_create_accounts_table::Migration),
            Box::new(m20250801_000004_create_demos_table::Migration),
            // 3. 集計クエリ用インデックス
            Box::new(m20250802_000001_add_aggregation_indexes::Migration),
        ]
    }
}
