//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for one booking conversation.
    ConversationId
);

uuid_id!(
    /// Unique identifier for a persisted travel request.
    TravelRequestId
);

/// Identifier of an authenticated user, as issued by the user store.
///
/// Unlike the other identifiers this is opaque text: the store owns its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from any non-empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, super::ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(super::ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_ids_are_unique() {
        assert_ne!(ConversationId::new(), ConversationId::new());
    }

    #[test]
    fn conversation_id_round_trips_through_string() {
        let id = ConversationId::new();
        let parsed: ConversationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn travel_request_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<TravelRequestId>().is_err());
    }

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::new("   ").is_err());
        assert_eq!(UserId::new("emp-42").unwrap().as_str(), "emp-42");
    }

    #[test]
    fn ids_serialize_transparently() {
        let user = UserId::new("emp-42").unwrap();
        assert_eq!(serde_json::to_string(&user).unwrap(), "\"emp-42\"");
    }
}
