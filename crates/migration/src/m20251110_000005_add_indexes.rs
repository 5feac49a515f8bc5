use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Vehicle: lookups by brand (delete guard, eager brand joins)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vehicle_brand")
                    .table(Vehicle::Table)
                    .col(Vehicle::BrandId)
                    .to_owned(),
            )
            .await?;

        // Ownership: reverse lookups by person
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ownership_person")
                    .table(Ownership::Table)
                    .col(Ownership::PersonId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_vehicle_brand").table(Vehicle::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ownership_person").table(Ownership::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vehicle { Table, BrandId }

#[derive(DeriveIden)]
enum Ownership { Table, PersonId }
