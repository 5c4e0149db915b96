//! Connector Framework traits
//!
//! Capability-based trait definitions. Every resource type a connector syncs
//! gets one [`ResourceSyncer`]; provisioning capabilities are layered on top
//! of it so a syncer only implements what the target supports.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::annotations::Annotations;
use crate::entitlement::{Entitlement, Grant};
use crate::error::SyncResult;
use crate::metadata::ConnectorMetadata;
use crate::pagination::{Page, PageToken};
use crate::resource::{Resource, ResourceId, ResourceType};

/// Base trait for all connectors.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Describes the connector and its account-creation schema.
    fn metadata(&self) -> ConnectorMetadata;

    /// Exercises the configured credentials against the target system.
    async fn validate(&self) -> SyncResult<Annotations>;

    /// One syncer per resource type the connector exposes.
    fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>>;
}

/// Read side of a single resource type.
///
/// Implementations hold no state between calls except immutable
/// configuration; the page token is owned by the caller and passed back
/// verbatim.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// The resource type this syncer produces.
    fn resource_type(&self) -> &ResourceType;

    /// Lists one page of resources.
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> SyncResult<Page<Resource>>;

    /// Lists the entitlements offered by `resource`.
    async fn entitlements(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> SyncResult<Page<Entitlement>>;

    /// Lists the grants of `resource`'s entitlements.
    async fn grants(&self, resource: &Resource, token: &PageToken) -> SyncResult<Page<Grant>>;
}

/// Capability for granting and revoking entitlements.
#[async_trait]
pub trait GrantProvisioner: ResourceSyncer {
    /// Grants `entitlement` to `principal`.
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement)
        -> SyncResult<Annotations>;

    /// Revokes an existing grant.
    async fn revoke(&self, grant: &Grant) -> SyncResult<Annotations>;
}

/// Profile supplied by the host when creating an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub profile: Map<String, Value>,
}

impl AccountInfo {
    #[must_use]
    pub fn new(profile: Map<String, Value>) -> Self {
        Self { profile }
    }

    /// Adds a string field to the profile.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.profile
            .insert(key.into(), Value::String(value.into()));
        self
    }

    /// A non-empty string field of the profile.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.profile
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Result of a successful account creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCreated {
    pub resource: Resource,
    pub annotations: Annotations,
}

/// Capability for creating and deleting accounts.
#[async_trait]
pub trait AccountManager: ResourceSyncer {
    /// Creates an account from the host-supplied profile.
    async fn create_account(&self, info: &AccountInfo) -> SyncResult<AccountCreated>;

    /// Deletes the account identified by `resource_id`.
    async fn delete(&self, resource_id: &ResourceId) -> SyncResult<Annotations>;
}
