use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, validation, vehicle};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brand")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vehicle,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Vehicle => Entity::has_many(vehicle::Entity).into() }
    }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vehicle.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validation::require_text("name", name)
}

pub fn validate_country(country: &str) -> Result<(), errors::ModelError> {
    validation::require_text("country", country)
}

/// Insert a brand after field validation. Name uniqueness is left to the caller
/// and, ultimately, to the unique index (surfaced as `ModelError::Conflict`).
pub async fn create<C: ConnectionTrait>(db: &C, name: &str, country: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_country(country)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        country: Set(country.to_string()),
    };
    Ok(am.insert(db).await?)
}
