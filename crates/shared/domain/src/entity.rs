//! Entity identity shared by all domain types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable identity of a domain entity.
///
/// Any string is accepted when an id is supplied; freshly created entities
/// get a random UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a new random identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Use the supplied id, or generate one
    pub fn or_generate(id: Option<EntityId>) -> Self {
        id.unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Common behaviour of identified domain types.
pub trait Entity {
    fn id(&self) -> &EntityId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_strings() {
        let id = EntityId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, EntityId::generate());
    }

    #[test]
    fn supplied_id_is_kept() {
        let id = EntityId::or_generate(Some(EntityId::from("userId-1")));
        assert_eq!(id.as_str(), "userId-1");
    }

    #[test]
    fn missing_id_is_generated() {
        let id = EntityId::or_generate(None);
        assert!(Uuid::parse_str(id.as_ref()).is_ok());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&EntityId::from("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
