use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(pk_auto(Vehicle::Id))
                    .col(string_len(Vehicle::Model, 128).not_null())
                    .col(integer(Vehicle::BrandId).not_null())
                    .col(integer(Vehicle::DoorCount).not_null())
                    .col(string_len(Vehicle::Color, 64).not_null())
                    .check(Expr::col(Vehicle::DoorCount).between(2, 5))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_brand")
                            .from(Vehicle::Table, Vehicle::BrandId)
                            .to(Brand::Table, Brand::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    Id,
    Model,
    BrandId,
    DoorCount,
    Color,
}

#[derive(DeriveIden)]
enum Brand { Table, Id }
