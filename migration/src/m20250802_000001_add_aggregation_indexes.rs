use sea_orm_migration::prelude::*;

use super::m20250801_000003_create_accounts_table::Accounts;
use super::m20250801_000004_create_demos_table::Demos;

#[derive(DeriveMigrationName)]
pub struct Migration;

const ACCOUNT_INDEXES: [(&str, Accounts); 4] = [
    ("idx_accounts_created_at", Accounts::CreatedAt),
    ("idx_accounts_updated_at", Accounts::UpdatedAt),
    ("idx_accounts_closed_at", Accounts::ClosedAt),
    ("idx_accounts_creator_user_id", Accounts::CreatorUserId),
];

const DEMO_PARTICIPANT_INDEXES: [(&str, Demos); 3] = [
    ("idx_demos_aligned_by_user_id", Demos::AlignedByUserId),
    ("idx_demos_done_by_user_id", Demos::DoneByUserId),
    ("idx_demos_account_id", Demos::AccountId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in ACCOUNT_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Accounts::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        for (name, column) in DEMO_PARTICIPANT_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Demos::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // ステータス別の日付フィルタ（完了は done_at、予定は scheduled_at）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_demos_status_done_at")
                    .table(Demos::Table)
                    .col(Demos::Status)
                    .col(Demos::DoneAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_demos_status_scheduled_at")
                    .table(Demos::Table)
                    .col(Demos::Status)
                    .col(Demos::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in ACCOUNT_INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .name(name)
                        .table(Accounts::Table)
                        .to_owned(),
                )
                .await?;
        }

        let demo_index_names = DEMO_PARTICIPANT_INDEXES
            .map(|(name, _)| name)
            .into_iter()
            .chain(["idx_demos_status_done_at", "idx_demos_status_scheduled_at"]);

        for name in demo_index_names {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .name(name)
                        .table(Demos::Table)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
