use sea_orm_migration::prelude::*;

mod m20260201_000001_create_reseller_bindings;
mod m20260201_000002_create_revenue_shares;
mod m20260201_000003_create_churn_signals;
mod m20260201_000004_create_order_rollups;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260201_000001_create_reseller_bindings::Migration),
            Box::new(m20260201_000002_create_revenue_shares::Migration),
            Box::new(m20260201_000003_create_churn_signals::Migration),
            Box::new(m20260201_000004_create_order_rollups::Migration),
        ]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("revenue_ledger_migrations").into_iden()
    }
}
