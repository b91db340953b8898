use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RevenueShares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RevenueShares::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RevenueShares::TenantId).uuid().not_null())
                    .col(ColumnDef::new(RevenueShares::InvoiceId).string().not_null())
                    .col(ColumnDef::new(RevenueShares::ResellerId).uuid().not_null())
                    .col(
                        ColumnDef::new(RevenueShares::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::CommissionCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::CommissionRateBps)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::PayoutStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::PeriodStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::PeriodEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RevenueShares::SettledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Idempotency key for payment deliveries.
        manager
            .create_index(
                Index::create()
                    .name("ux_revenue_shares_tenant_invoice")
                    .table(RevenueShares::Table)
                    .col(RevenueShares::TenantId)
                    .col(RevenueShares::InvoiceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_revenue_shares_tenant_created")
                    .table(RevenueShares::Table)
                    .col(RevenueShares::TenantId)
                    .col(RevenueShares::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RevenueShares::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RevenueShares {
    Table,
    Id,
    TenantId,
    InvoiceId,
    ResellerId,
    AmountCents,
    CommissionCents,
    CommissionRateBps,
    PayoutStatus,
    PeriodStart,
    PeriodEnd,
    CreatedAt,
    SettledAt,
}
