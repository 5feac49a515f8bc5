use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::sea_query::JoinType;
use tracing::{info, instrument};

use models::{brand, ownership, person, vehicle};
use crate::errors::{on_unique, ServiceError};
use crate::pagination::Pagination;
use crate::views::{PersonWithVehicles, VehicleWithBrand};

const DUPLICATE_NATIONAL_ID: &str = "national_id already exists";

#[derive(Debug, Clone, Default)]
pub struct PersonChanges {
    pub name: Option<String>,
    pub national_id: Option<String>,
}

impl PersonChanges {
    fn is_empty(&self) -> bool { self.name.is_none() && self.national_id.is_none() }
}

async fn ensure_national_id_available(txn: &DatabaseTransaction, national_id: &str) -> Result<(), ServiceError> {
    let taken = person::Entity::find()
        .filter(person::Column::NationalId.eq(national_id))
        .one(txn)
        .await?;
    match taken {
        Some(_) => Err(ServiceError::Conflict(DUPLICATE_NATIONAL_ID.to_string())),
        None => Ok(()),
    }
}

/// Register a person; `national_id` is unique across people.
#[instrument(skip(db))]
pub async fn create_person(db: &DatabaseConnection, name: &str, national_id: &str) -> Result<person::Model, ServiceError> {
    person::validate_name(name)?;
    person::validate_national_id(national_id)?;
    let txn = db.begin().await?;
    ensure_national_id_available(&txn, national_id).await?;
    let created = person::create(&txn, name, national_id)
        .await
        .map_err(|e| on_unique(e, DUPLICATE_NATIONAL_ID))?;
    txn.commit().await?;
    info!(person_id = created.id, "person_created");
    Ok(created)
}

/// People ordered by id.
pub async fn list_people(db: &DatabaseConnection, page: Pagination) -> Result<Vec<person::Model>, ServiceError> {
    let (skip, limit) = page.normalize();
    Ok(person::Entity::find()
        .order_by_asc(person::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

/// Get person by id.
pub async fn get_person(db: &DatabaseConnection, id: i32) -> Result<person::Model, ServiceError> {
    person::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("person"))
}

/// Apply the supplied fields; a `national_id` taken by someone else is a conflict.
#[instrument(skip(db))]
pub async fn update_person(db: &DatabaseConnection, id: i32, changes: PersonChanges) -> Result<person::Model, ServiceError> {
    if let Some(name) = &changes.name { person::validate_name(name)?; }
    if let Some(national_id) = &changes.national_id { person::validate_national_id(national_id)?; }

    let txn = db.begin().await?;
    let current = person::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("person"))?;
    if changes.is_empty() {
        txn.commit().await?;
        return Ok(current);
    }
    if let Some(national_id) = &changes.national_id {
        if national_id != &current.national_id {
            ensure_national_id_available(&txn, national_id).await?;
        }
    }

    let mut am: person::ActiveModel = current.into();
    if let Some(name) = changes.name { am.name = Set(name); }
    if let Some(national_id) = changes.national_id { am.national_id = Set(national_id); }
    let updated = am
        .update(&txn)
        .await
        .map_err(|e| on_unique(e.into(), DUPLICATE_NATIONAL_ID))?;
    txn.commit().await?;
    info!(person_id = id, "person_updated");
    Ok(updated)
}

/// Delete a person who owns no vehicle.
#[instrument(skip(db))]
pub async fn delete_person(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    person::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("person"))?;
    if ownership::count_for_person(&txn, id).await? > 0 {
        return Err(ServiceError::Conflict("person has associated vehicles".to_string()));
    }
    person::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(person_id = id, "person_deleted");
    Ok(())
}

/// The person plus every vehicle they own, each with its brand, ordered by vehicle id.
pub async fn list_vehicles_of(db: &DatabaseConnection, person_id: i32) -> Result<PersonWithVehicles, ServiceError> {
    let person = get_person(db, person_id).await?;
    let rows = vehicle::Entity::find()
        .join(JoinType::InnerJoin, vehicle::Relation::Ownership.def())
        .filter(ownership::Column::PersonId.eq(person_id))
        .find_also_related(brand::Entity)
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await?;
    let vehicles = rows
        .into_iter()
        .map(VehicleWithBrand::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PersonWithVehicles { person, vehicles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand_service::create_brand;
    use crate::test_support::get_db;
    use crate::vehicle_service::{assign_owner, create_vehicle, NewVehicle};

    #[tokio::test]
    async fn person_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let p = create_person(&db, "Ana", "123").await?;
        assert_eq!(get_person(&db, p.id).await?, p);

        let renamed = update_person(&db, p.id, PersonChanges { name: Some("Ana Maria".into()), ..Default::default() }).await?;
        assert_eq!(renamed.name, "Ana Maria");
        assert_eq!(renamed.national_id, "123");

        assert_eq!(list_people(&db, Pagination::default()).await?.len(), 1);
        delete_person(&db, p.id).await?;
        assert!(matches!(get_person(&db, p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn national_id_is_unique() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_person(&db, "Ana", "123").await?;
        let bo = create_person(&db, "Bo", "456").await?;

        assert!(matches!(create_person(&db, "Other", "123").await, Err(ServiceError::Conflict(_))));
        let err = update_person(&db, bo.id, PersonChanges { national_id: Some("123".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert!(create_person(&db, "", "789").await.unwrap_err().is_validation());
        Ok(())
    }

    #[tokio::test]
    async fn owner_cannot_be_deleted() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let b = create_brand(&db, "Toyota", "Japan").await?;
        let v = create_vehicle(&db, NewVehicle { model: "Corolla".into(), brand_id: b.id, door_count: 4, color: "red".into() }).await?;
        let p = create_person(&db, "Ana", "123").await?;
        assign_owner(&db, v.vehicle.id, p.id).await?;

        assert!(matches!(delete_person(&db, p.id).await, Err(ServiceError::Conflict(_))));
        assert!(get_person(&db, p.id).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn vehicles_of_person_are_ordered_with_brand() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let b = create_brand(&db, "Toyota", "Japan").await?;
        let p = create_person(&db, "Ana", "123").await?;
        let other = create_person(&db, "Bo", "456").await?;
        let v1 = create_vehicle(&db, NewVehicle { model: "Corolla".into(), brand_id: b.id, door_count: 4, color: "red".into() }).await?;
        let v2 = create_vehicle(&db, NewVehicle { model: "Yaris".into(), brand_id: b.id, door_count: 2, color: "blue".into() }).await?;
        let v3 = create_vehicle(&db, NewVehicle { model: "Hilux".into(), brand_id: b.id, door_count: 2, color: "white".into() }).await?;
        assign_owner(&db, v3.vehicle.id, p.id).await?;
        assign_owner(&db, v1.vehicle.id, p.id).await?;
        assign_owner(&db, v2.vehicle.id, other.id).await?;

        let owned = list_vehicles_of(&db, p.id).await?;
        assert_eq!(owned.person, p);
        let ids: Vec<_> = owned.vehicles.iter().map(|v| v.vehicle.id).collect();
        assert_eq!(ids, vec![v1.vehicle.id, v3.vehicle.id]);
        assert!(owned.vehicles.iter().all(|v| v.brand == b));

        let theirs = list_vehicles_of(&db, other.id).await?;
        assert_eq!(theirs.vehicles.len(), 1);
        assert!(matches!(list_vehicles_of(&db, 999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
