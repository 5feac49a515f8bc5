use std::ops::RangeInclusive;

use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{brand, errors, ownership, person, validation};

pub const DOOR_COUNT_RANGE: RangeInclusive<i32> = 2..=5;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub model: String,
    pub brand_id: i32,
    pub door_count: i32,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Brand,
    Ownership,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Brand => Entity::belongs_to(brand::Entity).from(Column::BrandId).to(brand::Column::Id).into(),
            Relation::Ownership => Entity::has_many(ownership::Entity).into(),
        }
    }
}

impl Related<brand::Entity> for Entity {
    fn to() -> RelationDef { Relation::Brand.def() }
}

impl Related<ownership::Entity> for Entity {
    fn to() -> RelationDef { Relation::Ownership.def() }
}

impl Related<person::Entity> for Entity {
    fn to() -> RelationDef { ownership::Relation::Person.def() }
    fn via() -> Option<RelationDef> { Some(ownership::Relation::Vehicle.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_model(model: &str) -> Result<(), errors::ModelError> {
    validation::require_text("model", model)
}

pub fn validate_color(color: &str) -> Result<(), errors::ModelError> {
    validation::require_text("color", color)
}

pub fn validate_door_count(door_count: i32) -> Result<(), errors::ModelError> {
    if !DOOR_COUNT_RANGE.contains(&door_count) {
        return Err(errors::ModelError::Validation(format!(
            "door_count must be between {} and {}",
            DOOR_COUNT_RANGE.start(),
            DOOR_COUNT_RANGE.end()
        )));
    }
    Ok(())
}

/// Field-level checks for a full vehicle record.
pub fn validate(model: &str, door_count: i32, color: &str) -> Result<(), errors::ModelError> {
    validate_model(model)?;
    validate_door_count(door_count)?;
    validate_color(color)
}

/// Insert a vehicle after field validation. Brand existence is checked by the
/// caller; a dangling `brand_id` is rejected by the foreign key as `ModelError::ForeignKey`.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    model: &str,
    brand_id: i32,
    door_count: i32,
    color: &str,
) -> Result<Model, errors::ModelError> {
    validate(model, door_count, color)?;
    let am = ActiveModel {
        id: NotSet,
        model: Set(model.to_string()),
        brand_id: Set(brand_id),
        door_count: Set(door_count),
        color: Set(color.to_string()),
    };
    Ok(am.insert(db).await?)
}
