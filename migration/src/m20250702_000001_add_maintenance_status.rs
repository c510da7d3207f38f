use sea_orm::Statement;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Owners block scooters for repairs with maintenance bookings
        let stmt = Statement::from_string(
            manager.get_database_backend(),
            "ALTER TYPE booking_status ADD VALUE IF NOT EXISTS 'maintenance'".to_string(),
        );
        manager.get_connection().execute(stmt).await?;
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // PostgreSQL cannot drop a single enum value; noop
        Ok(())
    }
}
