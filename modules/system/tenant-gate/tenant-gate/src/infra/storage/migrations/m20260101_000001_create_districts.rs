use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Districts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Districts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Districts::Name).string().not_null())
                    .col(ColumnDef::new(Districts::CustomDomain).string().null())
                    .col(
                        ColumnDef::new(Districts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Districts::DomainVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Districts::SubscriptionStatus)
                            .string()
                            .not_null()
                            .default("inactive"),
                    )
                    .col(ColumnDef::new(Districts::AdminUserId).uuid().null())
                    .col(
                        ColumnDef::new(Districts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_districts_custom_domain")
                    .table(Districts::Table)
                    .col(Districts::CustomDomain)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_districts_admin_user_id")
                    .table(Districts::Table)
                    .col(Districts::AdminUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Districts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Districts {
    Table,
    Id,
    Name,
    CustomDomain,
    IsActive,
    DomainVerified,
    SubscriptionStatus,
    AdminUserId,
    CreatedAt,
}
