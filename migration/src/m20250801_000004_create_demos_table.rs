use sea_orm_migration::prelude::*;

use super::m20250801_000003_create_accounts_table::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 参加者カラムには外部キーを張らない（未知ユーザーのデモも許容する）
        manager
            .create_table(
                Table::create()
                    .table(Demos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Demos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Demos::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Demos::AlignedByUserId).uuid().not_null())
                    .col(ColumnDef::new(Demos::DoneByUserId).uuid().null())
                    .col(
                        ColumnDef::new(Demos::Status)
                            .string_len(16)
                            .not_null()
                            .default("Scheduled"),
                    )
                    .col(
                        ColumnDef::new(Demos::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Demos::DoneAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Demos::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Demos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Demos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_demos_account_id")
                            .from(Demos::Table, Demos::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Demos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Demos {
    Table,
    Id,
    AccountId,
    AlignedByUserId,
    DoneByUserId,
    Status,
    ScheduledAt,
    DoneAt,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
