//! Entitlements and grants.

use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceType};

/// What holding an entitlement means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    /// Membership-style entitlement (e.g. "has role X").
    #[default]
    Assignment,
}

/// A named capability attached to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// `"{resource_type}:{resource_id}:{slug}"`.
    pub id: String,
    /// The resource the entitlement belongs to.
    pub resource: Resource,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub purpose: EntitlementPurpose,
    /// Resource type ids that may hold this entitlement.
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    /// Creates an assignment entitlement on `resource`.
    pub fn assignment(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: entitlement_id(resource, &slug),
            resource: resource.clone(),
            display_name: slug.clone(),
            description: String::new(),
            slug,
            purpose: EntitlementPurpose::Assignment,
            grantable_to: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id.clone());
        self
    }

    /// Returns true if resources of `resource_type_id` may hold this entitlement.
    #[must_use]
    pub fn is_grantable_to(&self, resource_type_id: &str) -> bool {
        self.grantable_to.iter().any(|t| t == resource_type_id)
    }
}

/// Builds the id of the entitlement `slug` on `resource`.
#[must_use]
pub fn entitlement_id(resource: &Resource, slug: &str) -> String {
    format!(
        "{}:{}:{}",
        resource.id.resource_type, resource.id.resource, slug
    )
}

/// A principal holding an entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// `"{entitlement_id}:{principal_type}:{principal_id}"`.
    pub id: String,
    pub entitlement: Entitlement,
    pub principal: Resource,
}

impl Grant {
    /// Creates a grant of the `slug` entitlement on `resource` to `principal`.
    pub fn new(resource: &Resource, slug: &str, principal: Resource) -> Self {
        Self::for_entitlement(Entitlement::assignment(resource, slug), principal)
    }

    /// Creates a grant of an existing entitlement to `principal`.
    #[must_use]
    pub fn for_entitlement(entitlement: Entitlement, principal: Resource) -> Self {
        let id = format!(
            "{}:{}:{}",
            entitlement.id, principal.id.resource_type, principal.id.resource
        );
        Self {
            id,
            entitlement,
            principal,
        }
    }
}
