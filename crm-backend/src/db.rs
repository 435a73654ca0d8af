// src/db.rs
use crate::config::AppConfig;
use sea_orm::{
    AccessMode, ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    IsolationLevel, TransactionTrait,
};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database.url.clone());

    // 接続オプションを設定
    opt.max_connections(config.database.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(30 * 60))
        .sqlx_logging(config.is_development());

    Database::connect(opt).await
}

/// 集計用の読み取り専用スナップショットを開始する
///
/// 1 リクエスト内の全クエリはこのトランザクション上で実行し、
/// 同一バージョンのデータから各カウンタを算出する。ロックは取らない。
pub async fn begin_read_snapshot<C>(db: &C) -> Result<DatabaseTransaction, DbErr>
where
    C: TransactionTrait,
{
    db.begin_with_config(
        Some(IsolationLevel::RepeatableRead),
        Some(AccessMode::ReadOnly),
    )
    .await
}
