use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResellerBindings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResellerBindings::TenantId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResellerBindings::ResellerId).uuid().not_null())
                    .col(
                        ColumnDef::new(ResellerBindings::CommissionRateBps)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResellerBindings::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ResellerBindings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResellerBindings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ResellerBindings {
    Table,
    TenantId,
    ResellerId,
    CommissionRateBps,
    Active,
    UpdatedAt,
}
