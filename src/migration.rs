//! Schema for local development and tests.
//!
//! Production reads `vendor_totals`, `departments` and `programs` from the
//! hosted database, where they are maintained by the data pipeline; these
//! migrations only create stand-ins with the same columns. Tables are derived
//! from the entity definitions so the two cannot drift apart.

use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entities::{Department, Program, Subscriber, VendorTotal, WhistleblowerTip};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(CreateSpendingTables),
            Box::new(CreateVisitorTables),
        ]
    }
}

async fn create_from_entity<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let schema = Schema::new(manager.get_database_backend());
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}

async fn drop_entity<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}

pub struct CreateSpendingTables;

impl MigrationName for CreateSpendingTables {
    fn name(&self) -> &'static str {
        "m20250101_000001_create_spending_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSpendingTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_from_entity(manager, VendorTotal).await?;
        create_from_entity(manager, Department).await?;
        create_from_entity(manager, Program).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity(manager, Program).await?;
        drop_entity(manager, Department).await?;
        drop_entity(manager, VendorTotal).await?;
        Ok(())
    }
}

pub struct CreateVisitorTables;

impl MigrationName for CreateVisitorTables {
    fn name(&self) -> &'static str {
        "m20250101_000002_create_visitor_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateVisitorTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_from_entity(manager, WhistleblowerTip).await?;
        create_from_entity(manager, Subscriber).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity(manager, Subscriber).await?;
        drop_entity(manager, WhistleblowerTip).await?;
        Ok(())
    }
}
