use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum AvailabilityOverrides {
    Table,
    Id,
    ScooterId,
    Day,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Scooters {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityOverrides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityOverrides::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityOverrides::ScooterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AvailabilityOverrides::Day).date().not_null())
                    .col(
                        ColumnDef::new(AvailabilityOverrides::IsAvailable)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityOverrides::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityOverrides::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_overrides_scooter")
                            .from(AvailabilityOverrides::Table, AvailabilityOverrides::ScooterId)
                            .to(Scooters::Table, Scooters::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // one override per scooter per day; the upsert path relies on this
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_availability_overrides_scooter_day")
                    .table(AvailabilityOverrides::Table)
                    .col(AvailabilityOverrides::ScooterId)
                    .col(AvailabilityOverrides::Day)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityOverrides::Table).to_owned())
            .await?;
        Ok(())
    }
}
