//! Uniform resource representation.
//!
//! Every upstream entity handed to the host is a [`Resource`]: a typed id, a
//! display name and a trait payload describing what kind of principal or
//! container it is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capability marker of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTraitKind {
    User,
    Role,
}

/// Descriptor of a kind of resource (e.g. "user", "role").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: String,
    pub display_name: String,
    pub traits: Vec<ResourceTraitKind>,
}

impl ResourceType {
    /// Creates a resource type with a single trait.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        kind: ResourceTraitKind,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            traits: vec![kind],
        }
    }
}

/// Typed identifier of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

/// Whether a user account may sign in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

/// Kind of account behind a user resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Unspecified,
    Human,
    Service,
}

/// An email address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    pub address: String,
    pub is_primary: bool,
}

/// Multi-factor authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaStatus {
    pub mfa_enabled: bool,
}

/// User-specific attributes of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTrait {
    pub login: Option<String>,
    pub emails: Vec<UserEmail>,
    pub status: UserStatus,
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_status: Option<MfaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub profile: Map<String, Value>,
}

impl UserTrait {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, address: impl Into<String>, is_primary: bool) -> Self {
        self.emails.push(UserEmail {
            address: address.into(),
            is_primary,
        });
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    #[must_use]
    pub fn with_mfa_status(mut self, mfa_enabled: bool) -> Self {
        self.mfa_status = Some(MfaStatus { mfa_enabled });
        self
    }

    #[must_use]
    pub fn with_last_login(mut self, last_login: DateTime<Utc>) -> Self {
        self.last_login = Some(last_login);
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: Map<String, Value>) -> Self {
        self.profile = profile;
        self
    }

    /// Primary email address, if any.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|e| e.is_primary)
            .map(|e| e.address.as_str())
    }
}

/// Role-specific attributes of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTrait {
    pub profile: Map<String, Value>,
}

/// Trait payload of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceTraits {
    User(UserTrait),
    Role(RoleTrait),
}

/// A synced entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<ResourceTraits>,
}

impl Resource {
    /// A bare reference to a resource, carrying only its id.
    #[must_use]
    pub fn reference(id: ResourceId) -> Self {
        Self {
            id,
            display_name: String::new(),
            parent_id: None,
            traits: None,
        }
    }

    /// Creates a user resource.
    pub fn user(
        display_name: impl Into<String>,
        resource_type: &ResourceType,
        id: impl Into<String>,
        user_trait: UserTrait,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id.clone(), id),
            display_name: display_name.into(),
            parent_id: None,
            traits: Some(ResourceTraits::User(user_trait)),
        }
    }

    /// Creates a role resource.
    pub fn role(
        display_name: impl Into<String>,
        resource_type: &ResourceType,
        id: impl Into<String>,
        role_trait: RoleTrait,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id.clone(), id),
            display_name: display_name.into(),
            parent_id: None,
            traits: Some(ResourceTraits::Role(role_trait)),
        }
    }

    #[must_use]
    pub fn user_trait(&self) -> Option<&UserTrait> {
        match &self.traits {
            Some(ResourceTraits::User(t)) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn role_trait(&self) -> Option<&RoleTrait> {
        match &self.traits {
            Some(ResourceTraits::Role(t)) => Some(t),
            _ => None,
        }
    }
}
