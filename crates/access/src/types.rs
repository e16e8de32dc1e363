use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role as issued at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Resident,
    BusinessOwner,
    CommunityOrganizer,
}

impl Role {
    pub const ALL: [Role; 3] = [
        Role::Resident,
        Role::BusinessOwner,
        Role::CommunityOrganizer,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Resident => "resident",
            Role::BusinessOwner => "business_owner",
            Role::CommunityOrganizer => "community_organizer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    /// Accepts wire names case-insensitively, with `-` or `_` separators.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| AccessError::UnknownRole(raw.to_string()))
    }
}

/// Opaque account identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An authenticated caller.
///
/// Unauthenticated requests are represented by the absence of an `Actor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn owns(&self, resource: &Resource) -> bool {
        self.id == resource.owner_id
    }
}

/// The ownership facts of a stored entity: a business, a review's parent
/// business, an account, a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub owner_id: ActorId,
}

impl Resource {
    pub fn owned_by(owner_id: impl Into<ActorId>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_wire_names() {
        assert_eq!("resident".parse::<Role>(), Ok(Role::Resident));
        assert_eq!("business_owner".parse::<Role>(), Ok(Role::BusinessOwner));
        assert_eq!(" Community-Organizer ".parse::<Role>(), Ok(Role::CommunityOrganizer));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(AccessError::UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn role_round_trips_through_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn actor_deserializes_from_wire_shape() {
        let actor: Actor =
            serde_json::from_str(r#"{"id":"u-1","role":"business_owner"}"#).unwrap();
        assert_eq!(actor, Actor::new("u-1", Role::BusinessOwner));
        assert!(actor.owns(&Resource::owned_by("u-1")));
        assert!(!actor.owns(&Resource::owned_by("u-2")));
    }
}
