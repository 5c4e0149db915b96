//! Sumo Logic REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use url::Url;

use crate::config::{SumoLogicConfig, SumoLogicCredentials};
use crate::models::{
    ApiListResponse, ApiPage, CreateUserRequest, RoleResponse, ServiceAccountResponse,
    UserResponse,
};
use crate::transport::{HttpTransport, RateLimited};
use crate::url_builder::{build_url, API_VERSION, PAGE_SIZE};
use crate::{SumoLogicError, SumoLogicResult};

const USERS_PATH: &str = "/api/{api-version}/users";
const USER_PATH: &str = "/api/{api-version}/users/{user-id}";
const SERVICE_ACCOUNTS_PATH: &str = "/api/{api-version}/serviceAccounts";
const ROLES_PATH: &str = "/api/{api-version}/roles";
const ROLE_PATH: &str = "/api/{api-version}/roles/{role-id}";
const ROLE_USER_PATH: &str = "/api/{api-version}/roles/{role-id}/users/{user-id}";

/// Operations of the Sumo Logic API used by the connector.
///
/// Every method reports the rate-limit data of its response, including on
/// failure.
#[async_trait]
pub trait SumoLogicApi: Send + Sync {
    /// Lists one page of human users.
    async fn list_users(&self, page_token: Option<&str>) -> RateLimited<ApiPage<UserResponse>>;

    async fn get_user(&self, user_id: &str) -> RateLimited<UserResponse>;

    async fn create_user(&self, request: &CreateUserRequest) -> RateLimited<UserResponse>;

    async fn delete_user(&self, user_id: &str) -> RateLimited<()>;

    /// Lists every service account. The endpoint has no cursor.
    async fn list_service_accounts(&self) -> RateLimited<Vec<ServiceAccountResponse>>;

    /// Lists one page of roles.
    async fn list_roles(&self, page_token: Option<&str>) -> RateLimited<ApiPage<RoleResponse>>;

    async fn get_role(&self, role_id: &str) -> RateLimited<RoleResponse>;

    async fn assign_role_to_user(&self, role_id: &str, user_id: &str) -> RateLimited<RoleResponse>;

    async fn remove_role_from_user(&self, role_id: &str, user_id: &str) -> RateLimited<()>;
}

/// HTTP implementation of [`SumoLogicApi`].
#[derive(Debug, Clone)]
pub struct SumoLogicClient {
    transport: HttpTransport,
    base_url: Url,
}

impl SumoLogicClient {
    /// Creates a client from configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or credentials are invalid, or
    /// the HTTP client cannot be created.
    pub fn new(config: &SumoLogicConfig, credentials: &SumoLogicCredentials) -> SumoLogicResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SumoLogicError::Config(format!("Failed to create HTTP client: {e}")))?;
        Self::with_http_client(http, &config.api_base_url, credentials)
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the credentials are
    /// invalid.
    pub fn with_http_client(
        http: reqwest::Client,
        api_base_url: &str,
        credentials: &SumoLogicCredentials,
    ) -> SumoLogicResult<Self> {
        credentials.validate()?;
        let base_url = Url::parse(api_base_url)?;
        let transport = HttpTransport::new(http, credentials)?;
        Ok(Self {
            transport,
            base_url,
        })
    }

    /// Aborts in-flight requests when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.transport = self.transport.with_cancellation(token);
        self
    }

    fn url(
        &self,
        template: &str,
        path_params: &[(&str, &str)],
        page_token: Option<&str>,
        page_size: Option<u32>,
    ) -> SumoLogicResult<Url> {
        let mut params = Vec::with_capacity(path_params.len() + 1);
        params.push(("api-version", API_VERSION));
        params.extend_from_slice(path_params);
        build_url(&self.base_url, template, &params, &[], page_token, page_size)
    }
}

#[async_trait]
impl SumoLogicApi for SumoLogicClient {
    #[instrument(skip(self))]
    async fn list_users(&self, page_token: Option<&str>) -> RateLimited<ApiPage<UserResponse>> {
        let url = match self.url(USERS_PATH, &[], page_token, Some(PAGE_SIZE)) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("list users"),
        };
        self.transport
            .execute_json::<ApiListResponse<UserResponse>, ()>(Method::GET, url, None)
            .await
            .map(ApiPage::from)
            .context("list users")
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> RateLimited<UserResponse> {
        let url = match self.url(USER_PATH, &[("user-id", user_id)], None, None) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("get user"),
        };
        self.transport
            .execute_json::<_, ()>(Method::GET, url, None)
            .await
            .context("get user")
    }

    #[instrument(skip(self, request))]
    async fn create_user(&self, request: &CreateUserRequest) -> RateLimited<UserResponse> {
        let url = match self.url(USERS_PATH, &[], None, None) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("create user"),
        };
        self.transport
            .execute_json(Method::POST, url, Some(request))
            .await
            .context("create user")
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str) -> RateLimited<()> {
        let url = match self.url(USER_PATH, &[("user-id", user_id)], None, None) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("delete user"),
        };
        self.transport
            .execute_empty::<()>(Method::DELETE, url, None)
            .await
            .context("delete user")
    }

    #[instrument(skip(self))]
    async fn list_service_accounts(&self) -> RateLimited<Vec<ServiceAccountResponse>> {
        let url = match self.url(SERVICE_ACCOUNTS_PATH, &[], None, None) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("list service accounts"),
        };
        self.transport
            .execute_json::<ApiListResponse<ServiceAccountResponse>, ()>(Method::GET, url, None)
            .await
            .map(|response| response.data)
            .context("list service accounts")
    }

    #[instrument(skip(self))]
    async fn list_roles(&self, page_token: Option<&str>) -> RateLimited<ApiPage<RoleResponse>> {
        let url = match self.url(ROLES_PATH, &[], page_token, Some(PAGE_SIZE)) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("list roles"),
        };
        self.transport
            .execute_json::<ApiListResponse<RoleResponse>, ()>(Method::GET, url, None)
            .await
            .map(ApiPage::from)
            .context("list roles")
    }

    #[instrument(skip(self))]
    async fn get_role(&self, role_id: &str) -> RateLimited<RoleResponse> {
        let url = match self.url(ROLE_PATH, &[("role-id", role_id)], None, None) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("get role"),
        };
        self.transport
            .execute_json::<_, ()>(Method::GET, url, None)
            .await
            .context("get role")
    }

    #[instrument(skip(self))]
    async fn assign_role_to_user(&self, role_id: &str, user_id: &str) -> RateLimited<RoleResponse> {
        let url = match self.url(
            ROLE_USER_PATH,
            &[("role-id", role_id), ("user-id", user_id)],
            None,
            None,
        ) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("assign role to user"),
        };
        self.transport
            .execute_json::<_, ()>(Method::PUT, url, None)
            .await
            .context("assign role to user")
    }

    #[instrument(skip(self))]
    async fn remove_role_from_user(&self, role_id: &str, user_id: &str) -> RateLimited<()> {
        let url = match self.url(
            ROLE_USER_PATH,
            &[("role-id", role_id), ("user-id", user_id)],
            None,
            None,
        ) {
            Ok(url) => url,
            Err(e) => return RateLimited::failed(e).context("remove role from user"),
        };
        self.transport
            .execute_empty::<()>(Method::DELETE, url, None)
            .await
            .context("remove role from user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SumoLogicClient {
        SumoLogicClient::new(
            &SumoLogicConfig::default(),
            &SumoLogicCredentials::new("id", "key"),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let config = SumoLogicConfig {
            api_base_url: "::not a url::".to_string(),
            ..Default::default()
        };
        let result = SumoLogicClient::new(&config, &SumoLogicCredentials::new("id", "key"));
        assert!(matches!(result, Err(SumoLogicError::Url(_))));
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let result = SumoLogicClient::new(
            &SumoLogicConfig::default(),
            &SumoLogicCredentials::new("", "key"),
        );
        assert!(matches!(result, Err(SumoLogicError::Config(_))));
    }

    #[test]
    fn test_url_includes_api_version() {
        let url = client()
            .url(ROLE_USER_PATH, &[("role-id", "r1"), ("user-id", "u1")], None, None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.sumologic.com/api/v1/roles/r1/users/u1"
        );
    }

    #[test]
    fn test_url_for_paged_listing() {
        let url = client()
            .url(USERS_PATH, &[], Some("next-page"), Some(PAGE_SIZE))
            .unwrap();
        assert_eq!(url.query(), Some("token=next-page&limit=100"));
    }
}
