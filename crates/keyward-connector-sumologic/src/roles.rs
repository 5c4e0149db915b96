//! Role syncer: roles, their membership entitlement and grants.

use std::sync::Arc;

use async_trait::async_trait;
use keyward_connector::annotations::Annotations;
use keyward_connector::entitlement::{Entitlement, Grant};
use keyward_connector::error::{ConnectorError, SyncError, SyncResult};
use keyward_connector::pagination::{Page, PageToken};
use keyward_connector::resource::{Resource, ResourceId, ResourceType};
use keyward_connector::traits::{GrantProvisioner, ResourceSyncer};
use tracing::{debug, error, info, instrument};

use crate::client::SumoLogicApi;
use crate::error::sync_error;
use crate::mapper::{map_role, ResourceTypes};

/// Slug of the role membership entitlement.
pub const ROLE_ASSIGNMENT_ENTITLEMENT: &str = "assigned";

/// Lists roles and manages role membership.
pub struct RoleSyncer {
    api: Arc<dyn SumoLogicApi>,
    types: ResourceTypes,
}

impl RoleSyncer {
    pub fn new(api: Arc<dyn SumoLogicApi>, types: ResourceTypes) -> Self {
        Self { api, types }
    }

    /// The membership entitlement of `role`.
    #[must_use]
    pub fn assignment_entitlement(&self, role: &Resource) -> Entitlement {
        Entitlement::assignment(role, ROLE_ASSIGNMENT_ENTITLEMENT)
            .with_display_name(format!("{} Role Member", role.display_name))
            .with_description(format!("Has the {} role in Sumo Logic", role.display_name))
            .with_grantable_to(&self.types.user)
    }

    fn ensure_user(&self, principal: &Resource, action: &str) -> SyncResult<()> {
        if principal.id.resource_type == self.types.user.id {
            return Ok(());
        }
        error!(
            principal_type = %principal.id.resource_type,
            principal_id = %principal.id.resource,
            "Only users can be {action} a role"
        );
        Err(SyncError::from(ConnectorError::PrincipalTypeMismatch {
            expected: self.types.user.id.clone(),
            actual: principal.id.resource_type.clone(),
        }))
    }
}

impl std::fmt::Debug for RoleSyncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleSyncer")
            .field("resource_type", &self.types.role.id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> &ResourceType {
        &self.types.role
    }

    #[instrument(skip(self, _parent))]
    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> SyncResult<Page<Resource>> {
        let mut annotations = Annotations::new();
        let (rate_limit, result) = self.api.list_roles(token.as_option()).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        let page = result.map_err(|e| sync_error("failed to list roles", e, &annotations))?;

        debug!(count = page.records.len(), "Fetched roles");
        let items = page
            .records
            .iter()
            .map(|role| map_role(role, &self.types.role))
            .collect();

        Ok(Page {
            items,
            next_page_token: PageToken::from(page.next_token),
            annotations,
        })
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> SyncResult<Page<Entitlement>> {
        Ok(Page::last(
            vec![self.assignment_entitlement(resource)],
            Annotations::new(),
        ))
    }

    /// Grants are built from the role's member list; a role without one has
    /// no grants.
    #[instrument(skip(self, resource, _token), fields(role_id = %resource.id.resource))]
    async fn grants(&self, resource: &Resource, _token: &PageToken) -> SyncResult<Page<Grant>> {
        let mut annotations = Annotations::new();
        let (rate_limit, result) = self.api.get_role(&resource.id.resource).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        let role = result.map_err(|e| sync_error("failed to get role", e, &annotations))?;

        let Some(users) = role.users else {
            return Ok(Page::last(Vec::new(), annotations));
        };

        let entitlement = self.assignment_entitlement(resource);
        let grants = users
            .into_iter()
            .map(|user_id| {
                let principal = Resource::reference(ResourceId::new(self.types.user.id.clone(), user_id));
                Grant::for_entitlement(entitlement.clone(), principal)
            })
            .collect();

        Ok(Page::last(grants, annotations))
    }
}

#[async_trait]
impl GrantProvisioner for RoleSyncer {
    /// Adds the principal to the entitlement's role.
    ///
    /// Whether the user already holds the role is not checked.
    #[instrument(skip(self, principal, entitlement), fields(
        principal_id = %principal.id.resource,
        role_id = %entitlement.resource.id.resource,
    ))]
    async fn grant(
        &self,
        principal: &Resource,
        entitlement: &Entitlement,
    ) -> SyncResult<Annotations> {
        self.ensure_user(principal, "assigned to")?;

        let mut annotations = Annotations::new();
        let (rate_limit, result) = self
            .api
            .assign_role_to_user(&entitlement.resource.id.resource, &principal.id.resource)
            .await
            .into_parts();
        annotations.with_rate_limiting(rate_limit);
        result.map_err(|e| sync_error("failed to assign role to user", e, &annotations))?;

        info!("Assigned role to user");
        Ok(annotations)
    }

    /// Removes the grant's principal from the role.
    ///
    /// Whether the user still holds the role is not checked.
    #[instrument(skip(self, grant), fields(
        principal_id = %grant.principal.id.resource,
        role_id = %grant.entitlement.resource.id.resource,
    ))]
    async fn revoke(&self, grant: &Grant) -> SyncResult<Annotations> {
        self.ensure_user(&grant.principal, "revoked from")?;

        let mut annotations = Annotations::new();
        let (rate_limit, result) = self
            .api
            .remove_role_from_user(
                &grant.entitlement.resource.id.resource,
                &grant.principal.id.resource,
            )
            .await
            .into_parts();
        annotations.with_rate_limiting(rate_limit);
        result.map_err(|e| sync_error("failed to revoke role from user", e, &annotations))?;

        info!("Revoked role from user");
        Ok(annotations)
    }
}
