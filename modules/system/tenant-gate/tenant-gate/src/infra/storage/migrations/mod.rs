use sea_orm_migration::prelude::*;

mod m20260101_000001_create_districts;
mod m20260101_000002_create_restaurants;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_districts::Migration),
            Box::new(m20260101_000002_create_restaurants::Migration),
        ]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("tenant_gate_migrations").into_iden()
    }
}
