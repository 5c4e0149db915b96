//! Conversion of API records into connector resources.
//!
//! The functions here are pure: the same record always yields the same
//! resource.

use chrono::{DateTime, SecondsFormat, Utc};
use keyward_connector::resource::{
    AccountType, Resource, ResourceTraitKind, ResourceType, RoleTrait, UserStatus, UserTrait,
};
use serde_json::{Map, Value};

use crate::models::{BaseAccount, RoleResponse, ServiceAccountResponse, UserResponse};

/// Resource type id of users.
pub const USER_RESOURCE_TYPE: &str = "user";

/// Resource type id of roles.
pub const ROLE_RESOURCE_TYPE: &str = "role";

/// The resource types the connector produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTypes {
    pub user: ResourceType,
    pub role: ResourceType,
}

impl Default for ResourceTypes {
    fn default() -> Self {
        Self {
            user: ResourceType::new(USER_RESOURCE_TYPE, "User", ResourceTraitKind::User),
            role: ResourceType::new(ROLE_RESOURCE_TYPE, "Role", ResourceTraitKind::Role),
        }
    }
}

/// An account of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Human(UserResponse),
    Service(ServiceAccountResponse),
}

impl Account {
    #[must_use]
    pub fn base(&self) -> &BaseAccount {
        match self {
            Account::Human(user) => &user.base,
            Account::Service(account) => &account.base,
        }
    }
}

impl From<UserResponse> for Account {
    fn from(user: UserResponse) -> Self {
        Account::Human(user)
    }
}

impl From<ServiceAccountResponse> for Account {
    fn from(account: ServiceAccountResponse) -> Self {
        Account::Service(account)
    }
}

/// Maps an account to a user resource.
///
/// An account is disabled only when the API reports `isActive: false`. A
/// missing flag maps to enabled.
#[must_use]
pub fn map_account(account: &Account, user_type: &ResourceType) -> Resource {
    let base = account.base();

    let mut profile = Map::new();
    profile.insert("id".into(), Value::String(base.id.clone()));
    profile.insert("email".into(), Value::String(base.email.clone()));
    profile.insert("created_at".into(), timestamp(base.created_at));
    profile.insert("created_by".into(), Value::String(base.created_by.clone()));
    profile.insert("modified_at".into(), timestamp(base.modified_at));
    profile.insert("modified_by".into(), Value::String(base.modified_by.clone()));

    let status = if base.is_active == Some(false) {
        UserStatus::Disabled
    } else {
        UserStatus::Enabled
    };

    let mut user_trait = UserTrait::new()
        .with_login(base.email.clone())
        .with_email(base.email.clone(), true)
        .with_status(status);
    if let Some(created_at) = base.created_at {
        user_trait = user_trait.with_created_at(created_at);
    }

    let display_name = match account {
        Account::Human(user) => {
            if let Some(is_locked) = user.is_locked {
                profile.insert("is_locked".into(), Value::Bool(is_locked));
            }
            if let Some(mfa_enabled) = user.is_mfa_enabled {
                user_trait = user_trait.with_mfa_status(mfa_enabled);
            }
            if let Some(last_login) = user.last_login_timestamp {
                user_trait = user_trait.with_last_login(last_login);
            }
            user_trait = user_trait.with_account_type(AccountType::Human);
            format!("{} {}", user.first_name, user.last_name)
        }
        Account::Service(service) => {
            user_trait = user_trait.with_account_type(AccountType::Service);
            service.name.clone()
        }
    };
    profile.insert("full_name".into(), Value::String(display_name.clone()));

    Resource::user(
        display_name,
        user_type,
        base.id.clone(),
        user_trait.with_profile(profile),
    )
}

/// Maps a role to a role resource.
#[must_use]
pub fn map_role(role: &RoleResponse, role_type: &ResourceType) -> Resource {
    let mut profile = Map::new();
    profile.insert("role_id".into(), Value::String(role.id.clone()));
    profile.insert("role_name".into(), Value::String(role.name.clone()));
    profile.insert(
        "description".into(),
        Value::String(role.description.clone().unwrap_or_default()),
    );
    profile.insert("modified_by".into(), Value::String(role.modified_by.clone()));
    profile.insert("modified_at".into(), Value::String(role.modified_at.clone()));
    profile.insert("created_by".into(), Value::String(role.created_by.clone()));
    profile.insert("created_at".into(), Value::String(role.created_at.clone()));

    if let Some(system_defined) = role.system_defined {
        profile.insert("system_defined".into(), Value::Bool(system_defined));
    }
    if let Some(filter) = &role.filter_predicate {
        profile.insert("filter_predicate".into(), Value::String(filter.clone()));
    }
    if let Some(capabilities) = &role.capabilities {
        profile.insert(
            "capabilities".into(),
            Value::Array(capabilities.iter().cloned().map(Value::String).collect()),
        );
    }

    Resource::role(
        role.name.clone(),
        role_type,
        role.id.clone(),
        RoleTrait { profile },
    )
}

fn timestamp(value: Option<DateTime<Utc>>) -> Value {
    value.map_or(Value::Null, |ts| {
        Value::String(ts.to_rfc3339_opts(SecondsFormat::Secs, true))
    })
}
