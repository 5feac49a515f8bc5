//! Create `ownership` join table between `vehicle` and `person`.
//!
//! The composite primary key makes each (vehicle, person) pair unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ownership::Table)
                    .if_not_exists()
                    .col(integer(Ownership::VehicleId).not_null())
                    .col(integer(Ownership::PersonId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_ownership")
                            .col(Ownership::VehicleId)
                            .col(Ownership::PersonId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ownership_vehicle")
                            .from(Ownership::Table, Ownership::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ownership_person")
                            .from(Ownership::Table, Ownership::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ownership::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ownership { Table, VehicleId, PersonId }

#[derive(DeriveIden)]
enum Vehicle { Table, Id }

#[derive(DeriveIden)]
enum Person { Table, Id }
