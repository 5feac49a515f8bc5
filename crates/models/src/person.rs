use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, ownership, validation, vehicle};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Full name.
    pub name: String,
    #[sea_orm(unique)]
    pub national_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Ownership,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Ownership => Entity::has_many(ownership::Entity).into() }
    }
}

impl Related<ownership::Entity> for Entity {
    fn to() -> RelationDef { Relation::Ownership.def() }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef { ownership::Relation::Vehicle.def() }
    fn via() -> Option<RelationDef> { Some(ownership::Relation::Person.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validation::require_text("name", name)
}

pub fn validate_national_id(national_id: &str) -> Result<(), errors::ModelError> {
    validation::require_text("national_id", national_id)
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, national_id: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_national_id(national_id)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        national_id: Set(national_id.to_string()),
    };
    Ok(am.insert(db).await?)
}
