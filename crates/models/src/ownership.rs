//! Join entity recording which people own which vehicles.
//!
//! Rows are only written through [`assign`] and [`remove`]; the composite
//! primary key keeps each (vehicle, person) pair unique.

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, person, vehicle};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ownership")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vehicle_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub person_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vehicle,
    Person,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vehicle => Entity::belongs_to(vehicle::Entity).from(Column::VehicleId).to(vehicle::Column::Id).into(),
            Relation::Person => Entity::belongs_to(person::Entity).from(Column::PersonId).to(person::Column::Id).into(),
        }
    }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vehicle.def() }
}

impl Related<person::Entity> for Entity {
    fn to() -> RelationDef { Relation::Person.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn exists<C: ConnectionTrait>(db: &C, vehicle_id: i32, person_id: i32) -> Result<bool, errors::ModelError> {
    Ok(Entity::find_by_id((vehicle_id, person_id)).one(db).await?.is_some())
}

/// Record `person_id` as an owner of `vehicle_id`. A duplicate pair surfaces
/// as `ModelError::Conflict` from the primary key.
pub async fn assign<C: ConnectionTrait>(db: &C, vehicle_id: i32, person_id: i32) -> Result<(), errors::ModelError> {
    let am = ActiveModel { vehicle_id: Set(vehicle_id), person_id: Set(person_id) };
    Entity::insert(am).exec_without_returning(db).await?;
    Ok(())
}

/// Delete one pair; returns whether a row was removed.
pub async fn remove<C: ConnectionTrait>(db: &C, vehicle_id: i32, person_id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id((vehicle_id, person_id)).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Delete every ownership row of a vehicle; returns the number removed.
pub async fn remove_all_for_vehicle<C: ConnectionTrait>(db: &C, vehicle_id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::VehicleId.eq(vehicle_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn count_for_person<C: ConnectionTrait>(db: &C, person_id: i32) -> Result<u64, errors::ModelError> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find().filter(Column::PersonId.eq(person_id)).count(db).await?)
}
