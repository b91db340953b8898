use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderRollups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderRollups::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(OrderRollups::Day)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderRollups::OrderCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrderRollups::TenantId)
                            .col(OrderRollups::Day),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderRollups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OrderRollups {
    Table,
    TenantId,
    Day,
    OrderCount,
}
