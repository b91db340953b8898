use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChurnSignals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChurnSignals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChurnSignals::TenantId).uuid().not_null())
                    .col(ColumnDef::new(ChurnSignals::RiskScore).integer().not_null())
                    .col(ColumnDef::new(ChurnSignals::RiskLevel).string().not_null())
                    .col(ColumnDef::new(ChurnSignals::Reasons).text().not_null())
                    .col(
                        ColumnDef::new(ChurnSignals::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_churn_signals_tenant_computed")
                    .table(ChurnSignals::Table)
                    .col(ChurnSignals::TenantId)
                    .col(ChurnSignals::ComputedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChurnSignals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ChurnSignals {
    Table,
    Id,
    TenantId,
    RiskScore,
    RiskLevel,
    Reasons,
    ComputedAt,
}
