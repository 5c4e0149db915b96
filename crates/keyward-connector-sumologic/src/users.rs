//! User syncer: human users and service accounts.

use std::sync::Arc;

use async_trait::async_trait;
use keyward_connector::annotations::Annotations;
use keyward_connector::entitlement::{Entitlement, Grant};
use keyward_connector::error::{ConnectorError, SyncError, SyncResult};
use keyward_connector::pagination::{Page, PageToken};
use keyward_connector::resource::{Resource, ResourceId, ResourceType};
use keyward_connector::traits::{AccountCreated, AccountInfo, AccountManager, ResourceSyncer};
use tracing::{debug, info, instrument, warn};

use crate::client::SumoLogicApi;
use crate::error::sync_error;
use crate::mapper::{map_account, Account, ResourceTypes};
use crate::models::CreateUserRequest;

/// Profile keys required to create an account.
pub const FIRST_NAME_FIELD: &str = "first_name";
pub const LAST_NAME_FIELD: &str = "last_name";
pub const EMAIL_FIELD: &str = "email";
pub const DEFAULT_ROLE_ID_FIELD: &str = "default_role_id";

/// Lists users and provisions accounts.
///
/// Service accounts have no cursor upstream; they are fetched in full on the
/// first page of a listing and never again.
pub struct UserSyncer {
    api: Arc<dyn SumoLogicApi>,
    types: ResourceTypes,
    include_service_accounts: bool,
}

impl UserSyncer {
    pub fn new(
        api: Arc<dyn SumoLogicApi>,
        types: ResourceTypes,
        include_service_accounts: bool,
    ) -> Self {
        Self {
            api,
            types,
            include_service_accounts,
        }
    }
}

impl std::fmt::Debug for UserSyncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSyncer")
            .field("resource_type", &self.types.user.id)
            .field("include_service_accounts", &self.include_service_accounts)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> &ResourceType {
        &self.types.user
    }

    #[instrument(skip(self, _parent))]
    async fn list(
        &self,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> SyncResult<Page<Resource>> {
        let mut annotations = Annotations::new();
        let mut resources = Vec::new();

        if token.is_start() && self.include_service_accounts {
            let (rate_limit, result) = self.api.list_service_accounts().await.into_parts();
            annotations.with_rate_limiting(rate_limit);
            let accounts =
                result.map_err(|e| sync_error("failed to get service accounts", e, &annotations))?;

            debug!(count = accounts.len(), "Fetched service accounts");
            resources.extend(
                accounts
                    .into_iter()
                    .map(|account| map_account(&Account::Service(account), &self.types.user)),
            );
        }

        let (rate_limit, result) = self.api.list_users(token.as_option()).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        let page = result.map_err(|e| sync_error("failed to get human accounts", e, &annotations))?;

        debug!(count = page.records.len(), "Fetched human accounts");
        resources.extend(
            page.records
                .into_iter()
                .map(|user| map_account(&Account::Human(user), &self.types.user)),
        );

        Ok(Page {
            items: resources,
            next_page_token: PageToken::from(page.next_token),
            annotations,
        })
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _token: &PageToken,
    ) -> SyncResult<Page<Entitlement>> {
        Ok(Page::empty())
    }

    async fn grants(&self, _resource: &Resource, _token: &PageToken) -> SyncResult<Page<Grant>> {
        Ok(Page::empty())
    }
}

#[async_trait]
impl AccountManager for UserSyncer {
    #[instrument(skip(self, info))]
    async fn create_account(&self, info: &AccountInfo) -> SyncResult<AccountCreated> {
        let required = |field: &str| {
            info.get_str(field)
                .map(ToString::to_string)
                .ok_or_else(|| SyncError::from(ConnectorError::missing_field(field)))
        };
        let request = CreateUserRequest {
            first_name: required(FIRST_NAME_FIELD)?,
            last_name: required(LAST_NAME_FIELD)?,
            email: required(EMAIL_FIELD)?,
            role_ids: vec![required(DEFAULT_ROLE_ID_FIELD)?],
        };

        let mut annotations = Annotations::new();
        let (rate_limit, result) = self.api.create_user(&request).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        let user = result.map_err(|e| sync_error("failed to create user", e, &annotations))?;

        info!(user_id = %user.base.id, "Created user");
        let resource = map_account(&Account::Human(user), &self.types.user);
        Ok(AccountCreated {
            resource,
            annotations,
        })
    }

    /// Deletes a user and confirms it is gone.
    ///
    /// Succeeds only if a lookup after the delete reports the user as not
    /// found. Any other outcome of that lookup is a verification failure.
    #[instrument(skip(self), fields(user_id = %resource_id.resource))]
    async fn delete(&self, resource_id: &ResourceId) -> SyncResult<Annotations> {
        let mut annotations = Annotations::new();

        let (rate_limit, result) = self.api.get_user(&resource_id.resource).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        let user = result.map_err(|e| sync_error("failed to get user", e, &annotations))?;
        let user_id = user.base.id;

        let (rate_limit, result) = self.api.delete_user(&user_id).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        result.map_err(|e| sync_error("failed to delete user", e, &annotations))?;

        let (rate_limit, result) = self.api.get_user(&user_id).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        let error = match result {
            Err(e) if e.is_not_found() => {
                info!(user_id = %user_id, "Deleted user");
                return Ok(annotations);
            }
            Err(e) if e.is_cancelled() => ConnectorError::Cancelled,
            Err(e) => ConnectorError::delete_verification_failed_with_source(
                resource_id.to_string(),
                "unexpected error while confirming deletion",
                e,
            ),
            Ok(_) => ConnectorError::delete_verification_failed(
                resource_id.to_string(),
                "user still exists after deletion",
            ),
        };

        warn!(user_id = %user_id, error = %error, "Delete verification failed");
        Err(SyncError::new(error, annotations))
    }
}
