//! Common test utilities for keyward-connector-sumologic integration tests.

#![allow(dead_code)]

use keyward_connector_sumologic::{
    SumoLogicClient, SumoLogicConfig, SumoLogicConnector, SumoLogicCredentials,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_ID: &str = "suAbCdEf";
pub const ACCESS_KEY: &str = "s3cr3t-access-key";

/// Test data factory for human users.
pub fn create_test_user(id: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "firstName": first_name,
        "lastName": last_name,
        "createdAt": "2024-01-02T03:04:05Z",
        "createdBy": "0000000000000001",
        "modifiedAt": "2024-01-02T03:04:05Z",
        "modifiedBy": "0000000000000001",
        "roleIds": ["0000000000000010"],
        "isActive": true,
        "isLocked": false,
        "isMfaEnabled": true
    })
}

/// Test data factory for service accounts.
pub fn create_service_account(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{name}@service.example.com"),
        "createdAt": "2024-01-02T03:04:05Z",
        "createdBy": "0000000000000001",
        "modifiedAt": "2024-01-02T03:04:05Z",
        "modifiedBy": "0000000000000001",
        "roleIds": [],
        "isActive": true
    })
}

/// Test data factory for roles.
pub fn create_test_role(id: &str, name: &str, users: Option<Vec<&str>>) -> Value {
    let mut role = json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "filterPredicate": "",
        "capabilities": ["viewCollectors"],
        "createdAt": "2024-01-02T03:04:05Z",
        "createdBy": "0000000000000001",
        "modifiedAt": "2024-01-02T03:04:05Z",
        "modifiedBy": "0000000000000001",
        "systemDefined": false
    });
    if let Some(users) = users {
        role["users"] = json!(users);
    }
    role
}

/// Wraps items in the list envelope.
pub fn create_list_response(items: Vec<Value>, next: Option<&str>) -> Value {
    let mut response = json!({ "data": items });
    if let Some(next) = next {
        response["next"] = json!(next);
    }
    response
}

/// Creates an API error body.
pub fn create_error(code: &str, message: &str) -> Value {
    json!({
        "id": "IUUQI-DGH5I-TJ045",
        "errors": [],
        "code": code,
        "message": message
    })
}

pub fn credentials() -> SumoLogicCredentials {
    SumoLogicCredentials::new(ACCESS_ID, ACCESS_KEY)
}

pub fn config(base_url: &str) -> SumoLogicConfig {
    SumoLogicConfig::builder()
        .api_base_url(base_url)
        .request_timeout_secs(5)
        .build()
        .expect("valid config")
}

/// Mock server wrapper with common setup helpers.
pub struct MockSumoServer {
    pub server: MockServer,
}

impl MockSumoServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> SumoLogicClient {
        SumoLogicClient::new(&config(&self.url()), &credentials()).expect("client")
    }

    pub fn connector(&self) -> SumoLogicConnector {
        SumoLogicConnector::new(config(&self.url()), &credentials()).expect("connector")
    }

    pub fn connector_with(&self, config: SumoLogicConfig) -> SumoLogicConnector {
        SumoLogicConnector::new(config, &credentials()).expect("connector")
    }

    /// Sets up the service accounts endpoint.
    pub async fn mock_service_accounts(&self, accounts: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/api/v1/serviceAccounts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_list_response(accounts, None)),
            )
            .mount(&self.server)
            .await;
    }

    /// Sets up a single role lookup.
    pub async fn mock_get_role(&self, role: Value) {
        let id = role["id"].as_str().unwrap_or_default().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/roles/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(role))
            .mount(&self.server)
            .await;
    }
}
