//! Sumo Logic API payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub target: Option<String>,
}

/// Envelope of list endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of records and the cursor of the next page.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiPage<T> {
    pub records: Vec<T>,
    /// `None` (or empty) when the listing is complete.
    pub next_token: Option<String>,
}

impl<T> From<ApiListResponse<T>> for ApiPage<T> {
    fn from(response: ApiListResponse<T>) -> Self {
        Self {
            records: response.data,
            next_token: response.next.filter(|t| !t.is_empty()),
        }
    }
}

/// Fields shared by human users and service accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAccount {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_by: String,
    #[serde(default)]
    pub role_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A human user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(flatten)]
    pub base: BaseAccount,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Set when the account was locked after repeated failed logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mfa_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_timestamp: Option<DateTime<Utc>>,
}

/// A service account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountResponse {
    #[serde(flatten)]
    pub base: BaseAccount,
    #[serde(default)]
    pub name: String,
}

/// A role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_predicate: Option<String>,
    /// Member user ids. `None` when the role has no member list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autofill_dependencies: Option<bool>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub modified_at: String,
    #[serde(default)]
    pub modified_by: String,
    /// System-defined roles cannot be modified or deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_defined: Option<bool>,
}

/// Body of the create-user call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_response_deserialize() {
        let user: UserResponse = serde_json::from_value(json!({
            "id": "0000000000000002",
            "email": "jane@example.com",
            "firstName": "Jane",
            "lastName": "Doe",
            "createdAt": "2024-01-02T03:04:05Z",
            "createdBy": "0000000000000001",
            "modifiedAt": "2024-02-02T03:04:05Z",
            "modifiedBy": "0000000000000001",
            "roleIds": ["r1", "r2"],
            "isActive": true,
            "isMfaEnabled": false,
            "lastLoginTimestamp": "2024-03-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.base.id, "0000000000000002");
        assert_eq!(user.base.role_ids, vec!["r1", "r2"]);
        assert_eq!(user.base.is_active, Some(true));
        assert_eq!(user.is_mfa_enabled, Some(false));
        assert!(user.is_locked.is_none());
        assert!(user.last_login_timestamp.is_some());
    }

    #[test]
    fn test_minimal_service_account() {
        let account: ServiceAccountResponse =
            serde_json::from_value(json!({ "id": "1", "name": "ci-bot" })).unwrap();

        assert_eq!(account.name, "ci-bot");
        assert!(account.base.is_active.is_none());
        assert!(account.base.created_at.is_none());
        assert!(account.base.role_ids.is_empty());
    }

    #[test]
    fn test_role_without_users() {
        let role: RoleResponse = serde_json::from_value(json!({
            "id": "1",
            "name": "baton-role",
            "description": "Test Role"
        }))
        .unwrap();

        assert!(role.users.is_none());
        assert_eq!(role.description.as_deref(), Some("Test Role"));
    }

    #[test]
    fn test_list_response_into_page() {
        let response: ApiListResponse<RoleResponse> =
            serde_json::from_value(json!({ "data": [{ "id": "1" }], "next": "" })).unwrap();
        let page = ApiPage::from(response);

        assert_eq!(page.records.len(), 1);
        assert!(page.next_token.is_none());

        let response: ApiListResponse<RoleResponse> =
            serde_json::from_value(json!({ "next": "abc" })).unwrap();
        let page = ApiPage::from(response);
        assert!(page.records.is_empty());
        assert_eq!(page.next_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_create_user_request_serialize() {
        let request = CreateUserRequest {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            role_ids: vec!["r1".into()],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "roleIds": ["r1"]
            })
        );
    }
}
