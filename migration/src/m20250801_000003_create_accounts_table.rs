use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_users_table::Users;
use super::m20250801_000002_create_account_sizes_table::AccountSizes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Accounts::CreatorUserId).uuid().not_null())
                    .col(ColumnDef::new(Accounts::AccountSizeId).uuid().null())
                    .col(
                        ColumnDef::new(Accounts::DealStage)
                            .string_len(32)
                            .not_null()
                            .default("PROSPECT"),
                    )
                    .col(
                        ColumnDef::new(Accounts::ClosedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Accounts::NumberOfUsers).integer().null())
                    .col(
                        ColumnDef::new(Accounts::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_creator_user_id")
                            .from(Accounts::Table, Accounts::CreatorUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_account_size_id")
                            .from(Accounts::Table, Accounts::AccountSizeId)
                            .to(AccountSizes::Table, AccountSizes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Accounts {
    Table,
    Id,
    Name,
    CreatorUserId,
    AccountSizeId,
    DealStage,
    ClosedAt,
    NumberOfUsers,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
