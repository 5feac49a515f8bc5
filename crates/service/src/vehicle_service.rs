use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{info, instrument};

use models::errors::ModelError;
use models::{brand, ownership, person, vehicle};
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::views::{VehicleWithBrand, VehicleWithOwners};

const UNKNOWN_BRAND: &str = "brand does not exist";
const ALREADY_OWNER: &str = "person is already an owner of this vehicle";

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub model: String,
    pub brand_id: i32,
    pub door_count: i32,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub model: Option<String>,
    pub brand_id: Option<i32>,
    pub door_count: Option<i32>,
    pub color: Option<String>,
}

impl VehicleChanges {
    fn is_empty(&self) -> bool {
        self.model.is_none() && self.brand_id.is_none() && self.door_count.is_none() && self.color.is_none()
    }

    fn validate(&self) -> Result<(), ModelError> {
        if let Some(model) = &self.model { vehicle::validate_model(model)?; }
        if let Some(door_count) = self.door_count { vehicle::validate_door_count(door_count)?; }
        if let Some(color) = &self.color { vehicle::validate_color(color)?; }
        Ok(())
    }
}

async fn resolve_brand<C: ConnectionTrait>(db: &C, brand_id: i32) -> Result<brand::Model, ServiceError> {
    brand::Entity::find_by_id(brand_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::UnknownReference(UNKNOWN_BRAND.to_string()))
}

async fn require_vehicle<C: ConnectionTrait>(db: &C, id: i32) -> Result<vehicle::Model, ServiceError> {
    vehicle::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("vehicle"))
}

async fn require_person<C: ConnectionTrait>(db: &C, id: i32) -> Result<person::Model, ServiceError> {
    person::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("person"))
}

/// A dangling brand that slipped past the pre-check surfaces as a foreign key error.
fn on_foreign_key(e: ModelError) -> ServiceError {
    match e {
        ModelError::ForeignKey(_) => ServiceError::UnknownReference(UNKNOWN_BRAND.to_string()),
        other => other.into(),
    }
}

/// Create a vehicle of an existing brand; returns it with the brand attached.
#[instrument(skip(db))]
pub async fn create_vehicle(db: &DatabaseConnection, new: NewVehicle) -> Result<VehicleWithBrand, ServiceError> {
    vehicle::validate(&new.model, new.door_count, &new.color)?;
    let txn = db.begin().await?;
    let brand = resolve_brand(&txn, new.brand_id).await?;
    let created = vehicle::create(&txn, &new.model, new.brand_id, new.door_count, &new.color)
        .await
        .map_err(on_foreign_key)?;
    txn.commit().await?;
    info!(vehicle_id = created.id, brand_id = brand.id, "vehicle_created");
    Ok(VehicleWithBrand { vehicle: created, brand })
}

/// Vehicles ordered by id, brands resolved in the same query.
pub async fn list_vehicles(db: &DatabaseConnection, page: Pagination) -> Result<Vec<VehicleWithBrand>, ServiceError> {
    let (skip, limit) = page.normalize();
    vehicle::Entity::find()
        .find_also_related(brand::Entity)
        .order_by_asc(vehicle::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?
        .into_iter()
        .map(VehicleWithBrand::from_row)
        .collect()
}

/// Get vehicle by id, with its brand.
pub async fn get_vehicle(db: &DatabaseConnection, id: i32) -> Result<VehicleWithBrand, ServiceError> {
    let row = vehicle::Entity::find_by_id(id)
        .find_also_related(brand::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("vehicle"))?;
    VehicleWithBrand::from_row(row)
}

/// Apply the supplied fields; a new `brand_id` must resolve to an existing brand.
#[instrument(skip(db))]
pub async fn update_vehicle(db: &DatabaseConnection, id: i32, changes: VehicleChanges) -> Result<VehicleWithBrand, ServiceError> {
    changes.validate()?;

    let txn = db.begin().await?;
    let current = require_vehicle(&txn, id).await?;
    let brand = resolve_brand(&txn, changes.brand_id.unwrap_or(current.brand_id)).await?;
    if changes.is_empty() {
        txn.commit().await?;
        return Ok(VehicleWithBrand { vehicle: current, brand });
    }

    let mut am: vehicle::ActiveModel = current.into();
    if let Some(model) = changes.model { am.model = Set(model); }
    if let Some(brand_id) = changes.brand_id { am.brand_id = Set(brand_id); }
    if let Some(door_count) = changes.door_count { am.door_count = Set(door_count); }
    if let Some(color) = changes.color { am.color = Set(color); }
    let updated = am.update(&txn).await.map_err(|e| on_foreign_key(e.into()))?;
    txn.commit().await?;
    info!(vehicle_id = id, "vehicle_updated");
    Ok(VehicleWithBrand { vehicle: updated, brand })
}

/// Delete a vehicle together with its ownership rows.
#[instrument(skip(db))]
pub async fn delete_vehicle(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    require_vehicle(&txn, id).await?;
    let released = ownership::remove_all_for_vehicle(&txn, id).await?;
    vehicle::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(vehicle_id = id, owners_released = released, "vehicle_deleted");
    Ok(())
}

/// The vehicle, its brand, and its owners ordered by person id.
pub async fn list_owners(db: &DatabaseConnection, vehicle_id: i32) -> Result<VehicleWithOwners, ServiceError> {
    let VehicleWithBrand { vehicle, brand } = get_vehicle(db, vehicle_id).await?;
    let owners = vehicle
        .find_related(person::Entity)
        .order_by_asc(person::Column::Id)
        .all(db)
        .await?;
    Ok(VehicleWithOwners { vehicle, brand, owners })
}

/// Record a new owner. The vehicle is checked before the person.
#[instrument(skip(db))]
pub async fn assign_owner(db: &DatabaseConnection, vehicle_id: i32, person_id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    require_vehicle(&txn, vehicle_id).await?;
    require_person(&txn, person_id).await?;
    if ownership::exists(&txn, vehicle_id, person_id).await? {
        return Err(ServiceError::Conflict(ALREADY_OWNER.to_string()));
    }
    ownership::assign(&txn, vehicle_id, person_id)
        .await
        .map_err(|e| match e {
            ModelError::Conflict(_) => ServiceError::Conflict(ALREADY_OWNER.to_string()),
            other => other.into(),
        })?;
    txn.commit().await?;
    info!(vehicle_id, person_id, "owner_assigned");
    Ok(())
}

/// Remove one owner. The vehicle is checked before the person.
#[instrument(skip(db))]
pub async fn remove_owner(db: &DatabaseConnection, vehicle_id: i32, person_id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    require_vehicle(&txn, vehicle_id).await?;
    require_person(&txn, person_id).await?;
    if !ownership::remove(&txn, vehicle_id, person_id).await? {
        return Err(ServiceError::not_found("ownership"));
    }
    txn.commit().await?;
    info!(vehicle_id, person_id, "owner_removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand_service::{create_brand, delete_brand};
    use crate::person_service::{create_person, delete_person};
    use crate::test_support::get_db;

    fn corolla(brand_id: i32) -> NewVehicle {
        NewVehicle { model: "Corolla".into(), brand_id, door_count: 4, color: "red".into() }
    }

    #[tokio::test]
    async fn create_resolves_brand() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let toyota = create_brand(&db, "Toyota", "Japan").await?;
        let v = create_vehicle(&db, corolla(toyota.id)).await?;
        assert_eq!(v.brand, toyota);
        assert_eq!(v.vehicle.door_count, 4);

        let fetched = get_vehicle(&db, v.vehicle.id).await?;
        assert_eq!(fetched, v);
        let all = list_vehicles(&db, Pagination::default()).await?;
        assert_eq!(all, vec![v]);
        Ok(())
    }

    #[tokio::test]
    async fn toyota_corolla_ana_scenario() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let toyota = create_brand(&db, "Toyota", "Japan").await?;
        assert_eq!(toyota.id, 1);
        let v = create_vehicle(&db, NewVehicle { model: "Corolla".into(), brand_id: 1, door_count: 4, color: "Red".into() }).await?;
        assert_eq!(v.vehicle.id, 1);
        assert_eq!(v.brand.name, "Toyota");
        let ana = create_person(&db, "Ana", "123").await?;
        assert_eq!(ana.id, 1);

        assign_owner(&db, 1, 1).await?;
        let owners = list_owners(&db, 1).await?.owners;
        assert_eq!(owners.len(), 1);
        assert_eq!((owners[0].id, owners[0].name.as_str()), (1, "Ana"));

        assert!(matches!(delete_brand(&db, 1).await, Err(ServiceError::Conflict(_))));
        delete_vehicle(&db, 1).await?;
        delete_brand(&db, 1).await?;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_brand_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_vehicle(&db, corolla(42)).await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownReference(_)));
        assert!(err.is_validation());
        assert!(list_vehicles(&db, Pagination::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn non_positive_brand_id_is_an_unknown_brand() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for brand_id in [0, -5] {
            let err = create_vehicle(&db, corolla(brand_id)).await.unwrap_err();
            assert!(matches!(err, ServiceError::UnknownReference(_)), "brand_id={brand_id}");
            assert_eq!(err.to_string(), "brand does not exist");
        }

        let b = create_brand(&db, "Toyota", "Japan").await?;
        let v = create_vehicle(&db, corolla(b.id)).await?;
        let err = update_vehicle(&db, v.vehicle.id, VehicleChanges { brand_id: Some(0), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownReference(_)));
        assert_eq!(get_vehicle(&db, v.vehicle.id).await?.brand, b);
        Ok(())
    }

    #[tokio::test]
    async fn door_count_bounds() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let b = create_brand(&db, "Toyota", "Japan").await?;
        for doors in [1, 6] {
            let err = create_vehicle(&db, NewVehicle { door_count: doors, ..corolla(b.id) }).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "doors={doors}");
        }
        for doors in [2, 5] {
            let v = create_vehicle(&db, NewVehicle { door_count: doors, ..corolla(b.id) }).await?;
            assert_eq!(v.vehicle.door_count, doors);
        }
        let v = list_vehicles(&db, Pagination::default()).await?.remove(0);
        let err = update_vehicle(&db, v.vehicle.id, VehicleChanges { door_count: Some(6), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn blank_strings_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let b = create_brand(&db, "Toyota", "Japan").await?;
        let err = create_vehicle(&db, NewVehicle { model: "".into(), ..corolla(b.id) }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = create_vehicle(&db, NewVehicle { color: "  ".into(), ..corolla(b.id) }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_switches_brand_and_keeps_other_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let toyota = create_brand(&db, "Toyota", "Japan").await?;
        let ford = create_brand(&db, "Ford", "USA").await?;
        let v = create_vehicle(&db, corolla(toyota.id)).await?;

        let moved = update_vehicle(&db, v.vehicle.id, VehicleChanges { brand_id: Some(ford.id), ..Default::default() }).await?;
        assert_eq!(moved.brand, ford);
        assert_eq!(moved.vehicle.brand_id, ford.id);
        assert_eq!(moved.vehicle.model, "Corolla");
        assert_eq!(moved.vehicle.color, "red");

        let err = update_vehicle(&db, v.vehicle.id, VehicleChanges { brand_id: Some(999), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownReference(_)));
        assert!(matches!(update_vehicle(&db, 999, VehicleChanges::default()).await, Err(ServiceError::NotFound(_))));

        let unchanged = update_vehicle(&db, v.vehicle.id, VehicleChanges::default()).await?;
        assert_eq!(unchanged, moved);
        Ok(())
    }

    #[tokio::test]
    async fn ownership_lifecycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let toyota = create_brand(&db, "Toyota", "Japan").await?;
        let v = create_vehicle(&db, corolla(toyota.id)).await?;
        let ana = create_person(&db, "Ana", "123").await?;
        let bo = create_person(&db, "Bo", "456").await?;

        assign_owner(&db, v.vehicle.id, bo.id).await?;
        assign_owner(&db, v.vehicle.id, ana.id).await?;
        let err = assign_owner(&db, v.vehicle.id, ana.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let owned = list_owners(&db, v.vehicle.id).await?;
        assert_eq!(owned.brand, toyota);
        assert_eq!(owned.owners, vec![ana.clone(), bo.clone()]);

        remove_owner(&db, v.vehicle.id, bo.id).await?;
        assert!(matches!(remove_owner(&db, v.vehicle.id, bo.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(list_owners(&db, v.vehicle.id).await?.owners, vec![ana]);
        Ok(())
    }

    #[tokio::test]
    async fn vehicle_is_checked_before_person() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let b = create_brand(&db, "Toyota", "Japan").await?;
        let v = create_vehicle(&db, corolla(b.id)).await?;

        let err = assign_owner(&db, 999, 888).await.unwrap_err();
        assert_eq!(err.to_string(), "vehicle not found");
        let err = assign_owner(&db, v.vehicle.id, 888).await.unwrap_err();
        assert_eq!(err.to_string(), "person not found");
        let err = remove_owner(&db, 999, 888).await.unwrap_err();
        assert_eq!(err.to_string(), "vehicle not found");
        assert!(matches!(list_owners(&db, 999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_vehicle_releases_owner_and_brand() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let toyota = create_brand(&db, "Toyota", "Japan").await?;
        let v = create_vehicle(&db, corolla(toyota.id)).await?;
        let ana = create_person(&db, "Ana", "123").await?;
        assign_owner(&db, v.vehicle.id, ana.id).await?;

        assert!(matches!(delete_brand(&db, toyota.id).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(delete_person(&db, ana.id).await, Err(ServiceError::Conflict(_))));

        delete_vehicle(&db, v.vehicle.id).await?;
        assert!(matches!(get_vehicle(&db, v.vehicle.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_vehicle(&db, v.vehicle.id).await, Err(ServiceError::NotFound(_))));

        delete_person(&db, ana.id).await?;
        delete_brand(&db, toyota.id).await?;
        Ok(())
    }
}
