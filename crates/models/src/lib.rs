//! SeaORM entities for the vehicle registry plus field-level validation.
//!
//! Business rules spanning several tables (uniqueness pre-checks, delete
//! guards, ownership bookkeeping) live in the `service` crate.

pub mod errors;
pub mod db;
pub mod validation;
pub mod brand;
pub mod person;
pub mod vehicle;
pub mod ownership;
