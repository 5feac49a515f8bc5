//! Field validators shared by the entity modules.

use crate::errors::ModelError;

/// Required text: rejects empty and whitespace-only values.
pub fn require_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}
