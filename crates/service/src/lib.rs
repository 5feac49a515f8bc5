//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Runs every read-validate-write sequence inside one transaction.

pub mod errors;
pub mod pagination;
pub mod views;
pub mod brand_service;
pub mod person_service;
pub mod vehicle_service;
#[cfg(test)]
pub mod test_support;
