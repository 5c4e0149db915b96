//! # Connector Framework
//!
//! Host-facing abstractions for syncing identity data out of external
//! systems and provisioning changes back into them.
//!
//! ## Architecture
//!
//! - [`traits::Connector`] - Entry point: metadata, validation, syncers
//! - [`traits::ResourceSyncer`] - Paged listing of one resource type, with its
//!   entitlements and grants
//! - [`traits::GrantProvisioner`] - Grant and revoke entitlements
//! - [`traits::AccountManager`] - Create and delete accounts
//!
//! Every outcome carries [`annotations::Annotations`], including failures
//! (see [`error::SyncError`]), so rate-limit information is never lost.
//!
//! ## Crate Organization
//!
//! - [`resource`] - Resources, resource types and trait payloads
//! - [`entitlement`] - Entitlements and grants
//! - [`annotations`] - Side-channel metadata (rate limits)
//! - [`pagination`] - Page tokens, pages and [`pagination::list_all`]
//! - [`error`] - Error types
//! - [`metadata`] - Connector metadata and account-creation schema

pub mod annotations;
pub mod entitlement;
pub mod error;
pub mod metadata;
pub mod pagination;
pub mod resource;
pub mod traits;

/// Prelude module for convenient imports.
///
/// ```
/// use keyward_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::annotations::{Annotation, Annotations, RateLimitDescription, RateLimitStatus};
    pub use crate::entitlement::{Entitlement, EntitlementPurpose, Grant};
    pub use crate::error::{ConnectorError, ConnectorResult, SyncError, SyncResult};
    pub use crate::metadata::{AccountCreationField, AccountCreationSchema, ConnectorMetadata};
    pub use crate::pagination::{list_all, Page, PageToken};
    pub use crate::resource::{
        AccountType, MfaStatus, Resource, ResourceId, ResourceTraitKind, ResourceTraits,
        ResourceType, RoleTrait, UserEmail, UserStatus, UserTrait,
    };
    pub use crate::traits::{
        AccountCreated, AccountInfo, AccountManager, Connector, GrantProvisioner, ResourceSyncer,
    };
}

// Re-export async_trait for connector implementors
pub use async_trait::async_trait;
