//! Sumo Logic connector entry point.

use std::sync::Arc;

use async_trait::async_trait;
use keyward_connector::annotations::Annotations;
use keyward_connector::error::SyncResult;
use keyward_connector::metadata::{AccountCreationField, AccountCreationSchema, ConnectorMetadata};
use keyward_connector::traits::{Connector, ResourceSyncer};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::client::{SumoLogicApi, SumoLogicClient};
use crate::config::{SumoLogicConfig, SumoLogicCredentials};
use crate::error::sync_error;
use crate::mapper::ResourceTypes;
use crate::roles::RoleSyncer;
use crate::users::{
    UserSyncer, DEFAULT_ROLE_ID_FIELD, EMAIL_FIELD, FIRST_NAME_FIELD, LAST_NAME_FIELD,
};
use crate::SumoLogicResult;

/// Sumo Logic connector.
pub struct SumoLogicConnector {
    api: Arc<dyn SumoLogicApi>,
    config: SumoLogicConfig,
    types: ResourceTypes,
}

impl SumoLogicConnector {
    /// Creates a connector talking to the configured deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or credentials are invalid.
    pub fn new(config: SumoLogicConfig, credentials: &SumoLogicCredentials) -> SumoLogicResult<Self> {
        let client = SumoLogicClient::new(&config, credentials)?;
        info!(api_base_url = %config.api_base_url, "Created Sumo Logic connector");
        Ok(Self::with_api(Arc::new(client), config))
    }

    /// Creates a connector aborting in-flight requests when `token` fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or credentials are invalid.
    pub fn with_cancellation(
        config: SumoLogicConfig,
        credentials: &SumoLogicCredentials,
        token: CancellationToken,
    ) -> SumoLogicResult<Self> {
        let client = SumoLogicClient::new(&config, credentials)?.with_cancellation(token);
        Ok(Self::with_api(Arc::new(client), config))
    }

    /// Creates a connector over any [`SumoLogicApi`] implementation.
    pub fn with_api(api: Arc<dyn SumoLogicApi>, config: SumoLogicConfig) -> Self {
        Self {
            api,
            config,
            types: ResourceTypes::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SumoLogicConfig {
        &self.config
    }

    #[must_use]
    pub fn resource_types(&self) -> &ResourceTypes {
        &self.types
    }

    /// Syncer and account manager for users.
    #[must_use]
    pub fn users(&self) -> UserSyncer {
        UserSyncer::new(
            Arc::clone(&self.api),
            self.types.clone(),
            self.config.include_service_accounts,
        )
    }

    /// Syncer and grant provisioner for roles.
    #[must_use]
    pub fn roles(&self) -> RoleSyncer {
        RoleSyncer::new(Arc::clone(&self.api), self.types.clone())
    }
}

impl std::fmt::Debug for SumoLogicConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SumoLogicConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Connector for SumoLogicConnector {
    fn metadata(&self) -> ConnectorMetadata {
        let field = |display_name: &str, description: &str, placeholder: &str, order: u32| {
            AccountCreationField {
                display_name: display_name.to_string(),
                description: description.to_string(),
                required: true,
                placeholder: placeholder.to_string(),
                order,
            }
        };

        ConnectorMetadata {
            display_name: "Sumo Logic Connector".to_string(),
            description: "Sumo Logic Connector is a connector for Sumo Logic that allows you to \
                          manage users and roles in Sumo Logic."
                .to_string(),
            account_creation_schema: Some(
                AccountCreationSchema::new()
                    .with_field(
                        FIRST_NAME_FIELD,
                        field("First Name", "First name of the user.", "First Name", 1),
                    )
                    .with_field(
                        LAST_NAME_FIELD,
                        field("Last Name", "Last name of the user.", "Last Name", 2),
                    )
                    .with_field(
                        EMAIL_FIELD,
                        field("Email", "Email address of the user.", "email@example.com", 3),
                    )
                    .with_field(
                        DEFAULT_ROLE_ID_FIELD,
                        field(
                            "Default Role ID",
                            "The default role ID to be associated with the user.",
                            "RoleID",
                            4,
                        ),
                    ),
            ),
        }
    }

    /// Checks the credentials by reading the first page of roles.
    #[instrument(skip(self))]
    async fn validate(&self) -> SyncResult<Annotations> {
        let mut annotations = Annotations::new();
        let (rate_limit, result) = self.api.list_roles(None).await.into_parts();
        annotations.with_rate_limiting(rate_limit);
        result.map_err(|e| sync_error("failed to validate credentials", e, &annotations))?;
        Ok(annotations)
    }

    fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![Arc::new(self.users()), Arc::new(self.roles())]
    }
}
