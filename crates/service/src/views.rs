//! Read models combining an entity with its resolved relations.

use models::{brand, person, vehicle};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleWithBrand {
    #[serde(flatten)]
    pub vehicle: vehicle::Model,
    pub brand: brand::Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleWithOwners {
    #[serde(flatten)]
    pub vehicle: vehicle::Model,
    pub brand: brand::Model,
    pub owners: Vec<person::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonWithVehicles {
    #[serde(flatten)]
    pub person: person::Model,
    pub vehicles: Vec<VehicleWithBrand>,
}

impl VehicleWithBrand {
    /// Pair a row from `find_also_related(brand::Entity)`. The foreign key
    /// guarantees the brand; a missing one means the schema was bypassed.
    pub(crate) fn from_row((vehicle, brand): (vehicle::Model, Option<brand::Model>)) -> Result<Self, ServiceError> {
        match brand {
            Some(brand) => Ok(Self { vehicle, brand }),
            None => Err(ServiceError::Db(format!(
                "vehicle {} references missing brand {}",
                vehicle.id, vehicle.brand_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vehicle_fields_are_flat_with_nested_brand() {
        let brand = brand::Model { id: 1, name: "Toyota".into(), country: "Japan".into() };
        let vehicle = vehicle::Model { id: 7, model: "Corolla".into(), brand_id: 1, door_count: 4, color: "red".into() };
        let view = VehicleWithBrand { vehicle, brand };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "id": 7, "model": "Corolla", "brand_id": 1, "door_count": 4, "color": "red",
                "brand": {"id": 1, "name": "Toyota", "country": "Japan"}
            })
        );
    }

    #[test]
    fn missing_brand_is_a_storage_error() {
        let vehicle = vehicle::Model { id: 7, model: "Corolla".into(), brand_id: 3, door_count: 4, color: "red".into() };
        let err = VehicleWithBrand::from_row((vehicle, None)).unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
