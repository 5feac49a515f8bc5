use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};

use models::{brand, vehicle};
use crate::errors::{on_unique, ServiceError};
use crate::pagination::Pagination;

const DUPLICATE_NAME: &str = "brand name already exists";

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct BrandChanges {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl BrandChanges {
    fn is_empty(&self) -> bool { self.name.is_none() && self.country.is_none() }
}

async fn ensure_name_available(txn: &DatabaseTransaction, name: &str) -> Result<(), ServiceError> {
    let taken = brand::Entity::find()
        .filter(brand::Column::Name.eq(name))
        .one(txn)
        .await?;
    match taken {
        Some(_) => Err(ServiceError::Conflict(DUPLICATE_NAME.to_string())),
        None => Ok(()),
    }
}

/// Create a brand with a unique name.
#[instrument(skip(db))]
pub async fn create_brand(db: &DatabaseConnection, name: &str, country: &str) -> Result<brand::Model, ServiceError> {
    brand::validate_name(name)?;
    brand::validate_country(country)?;
    let txn = db.begin().await?;
    ensure_name_available(&txn, name).await?;
    let created = brand::create(&txn, name, country)
        .await
        .map_err(|e| on_unique(e, DUPLICATE_NAME))?;
    txn.commit().await?;
    info!(brand_id = created.id, "brand_created");
    Ok(created)
}

/// Brands ordered by id.
pub async fn list_brands(db: &DatabaseConnection, page: Pagination) -> Result<Vec<brand::Model>, ServiceError> {
    let (skip, limit) = page.normalize();
    Ok(brand::Entity::find()
        .order_by_asc(brand::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

/// Get brand by id.
pub async fn get_brand(db: &DatabaseConnection, id: i32) -> Result<brand::Model, ServiceError> {
    brand::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("brand"))
}

/// Apply the supplied fields. Renaming onto another brand's name is a conflict;
/// keeping the current name is not.
#[instrument(skip(db))]
pub async fn update_brand(db: &DatabaseConnection, id: i32, changes: BrandChanges) -> Result<brand::Model, ServiceError> {
    if let Some(name) = &changes.name { brand::validate_name(name)?; }
    if let Some(country) = &changes.country { brand::validate_country(country)?; }

    let txn = db.begin().await?;
    let current = brand::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("brand"))?;
    if changes.is_empty() {
        txn.commit().await?;
        return Ok(current);
    }
    if let Some(name) = &changes.name {
        if name != &current.name {
            ensure_name_available(&txn, name).await?;
        }
    }

    let mut am: brand::ActiveModel = current.into();
    if let Some(name) = changes.name { am.name = Set(name); }
    if let Some(country) = changes.country { am.country = Set(country); }
    let updated = am
        .update(&txn)
        .await
        .map_err(|e| on_unique(e.into(), DUPLICATE_NAME))?;
    txn.commit().await?;
    info!(brand_id = id, "brand_updated");
    Ok(updated)
}

/// Delete a brand no vehicle refers to.
#[instrument(skip(db))]
pub async fn delete_brand(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    brand::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("brand"))?;
    let dependents = vehicle::Entity::find()
        .filter(vehicle::Column::BrandId.eq(id))
        .count(&txn)
        .await?;
    if dependents > 0 {
        return Err(ServiceError::Conflict("brand has associated vehicles".to_string()));
    }
    brand::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(brand_id = id, "brand_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn brand_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let b = create_brand(&db, "Toyota", "Japan").await?;
        assert_eq!(b.name, "Toyota");
        assert_eq!(get_brand(&db, b.id).await?, b);

        let updated = update_brand(&db, b.id, BrandChanges { country: Some("JP".into()), ..Default::default() }).await?;
        assert_eq!(updated.name, "Toyota");
        assert_eq!(updated.country, "JP");

        delete_brand(&db, b.id).await?;
        assert!(matches!(get_brand(&db, b.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_brand(&db, "Toyota", "Japan").await?;
        let ford = create_brand(&db, "Ford", "USA").await?;

        let err = create_brand(&db, "Toyota", "Japan").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let err = update_brand(&db, ford.id, BrandChanges { name: Some("Toyota".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let same = update_brand(&db, ford.id, BrandChanges { name: Some("Ford".into()), ..Default::default() }).await?;
        assert_eq!(same.name, "Ford");
        Ok(())
    }

    #[tokio::test]
    async fn empty_fields_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(create_brand(&db, "", "Japan").await.unwrap_err().is_validation());
        assert!(create_brand(&db, "Toyota", " ").await.unwrap_err().is_validation());
        assert!(list_brands(&db, Pagination::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_and_paginated() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for name in ["A", "B", "C", "D"] {
            create_brand(&db, name, "X").await?;
        }
        let page = list_brands(&db, Pagination { skip: 1, limit: 2 }).await?;
        let names: Vec<_> = page.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert!(list_brands(&db, Pagination { skip: 10, limit: 5 }).await?.is_empty());
        assert!(list_brands(&db, Pagination { skip: 0, limit: 0 }).await?.is_empty());
        let far = Pagination { skip: (i64::MAX as u64) + 1, limit: 10 };
        assert!(list_brands(&db, far).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_brand_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(matches!(update_brand(&db, 99, BrandChanges::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_brand(&db, 99).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
