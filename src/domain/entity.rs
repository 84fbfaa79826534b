//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all stored entities.
//! Every entity has a unique, stable identifier.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier shared by pantry items, grocery items and waste entries
pub type ItemId = u64;

/// Placeholder for an id that could not be read; stores replace it on load
pub const UNASSIGNED_ID: ItemId = 0;

/// Core trait for all domain entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;

    /// Display name, compared case-insensitively for identity
    fn name(&self) -> &str;

    /// Case-insensitive name match
    fn has_name(&self, name: &str) -> bool {
        self.name().trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Reject blank text fields
pub(crate) fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Stored ids come as numbers or as strings (`"1717400000000"`, and
/// fractional ones from timestamp-plus-random ids). Anything that is not a
/// whole non-negative number becomes [`UNASSIGNED_ID`].
pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ItemId, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Whole(u64),
        Number(f64),
        Text(String),
    }

    let id = match RawId::deserialize(deserializer)? {
        RawId::Whole(id) => id,
        RawId::Number(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => value as u64,
        RawId::Number(_) => UNASSIGNED_ID,
        RawId::Text(text) => text.trim().parse().unwrap_or(UNASSIGNED_ID),
    };
    Ok(id)
}

/// Money amounts: `null` or a missing value reads as 0
pub(crate) fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::NotFound("pantry item 7".to_string());
        assert_eq!(err.to_string(), "Not found: pantry item 7");
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_id")]
        id: ItemId,
    }

    fn read_id(json: &str) -> ItemId {
        serde_json::from_str::<Row>(json).unwrap().id
    }

    #[test]
    fn test_ids_read_from_numbers_and_strings() {
        assert_eq!(read_id(r#"{"id": 42}"#), 42);
        assert_eq!(read_id(r#"{"id": 1717400000000.0}"#), 1717400000000);
        assert_eq!(read_id(r#"{"id": "1717400000000"}"#), 1717400000000);
        assert_eq!(read_id(r#"{"id": "17174000000000.4821"}"#), UNASSIGNED_ID);
        assert_eq!(read_id(r#"{"id": 1717400000000.25}"#), UNASSIGNED_ID);
        assert_eq!(read_id(r#"{"id": "abc"}"#), UNASSIGNED_ID);
        assert!(serde_json::from_str::<Row>(r#"{"id": true}"#).is_err());
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("name", "  ").is_err());
        assert!(require("name", "Milk").is_ok());
    }
}
