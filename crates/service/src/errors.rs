use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range field values.
    #[error("validation error: {0}")]
    Validation(String),
    /// A foreign key in the input does not resolve, e.g. an unknown brand.
    #[error("{0}")]
    UnknownReference(String),
    #[error("{0}")]
    NotFound(String),
    /// Uniqueness or dependent-row rule would be violated.
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownReference(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Conflict(msg) | ModelError::ForeignKey(msg) => Self::Conflict(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { ModelError::from(e).into() }
}

/// Replace a storage-level unique violation with a domain message.
pub(crate) fn on_unique(e: ModelError, msg: &str) -> ServiceError {
    match e {
        ModelError::Conflict(_) => ServiceError::Conflict(msg.to_string()),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_map_onto_service_taxonomy() {
        assert!(matches!(ServiceError::from(ModelError::Validation("x".into())), ServiceError::Validation(_)));
        assert!(matches!(ServiceError::from(ModelError::Conflict("x".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("x".into())), ServiceError::Db(_)));
    }

    #[test]
    fn unique_violation_gets_domain_message() {
        let e = on_unique(ModelError::Conflict("UNIQUE constraint failed: brand.name".into()), "brand name already exists");
        assert_eq!(e.to_string(), "brand name already exists");
        let passthrough = on_unique(ModelError::Validation("name required".into()), "ignored");
        assert!(passthrough.is_validation());
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(ServiceError::not_found("vehicle").to_string(), "vehicle not found");
    }
}
