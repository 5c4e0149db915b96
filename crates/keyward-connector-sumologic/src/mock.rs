//! Scripted [`SumoLogicApi`] for sync engine tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use keyward_connector::annotations::{RateLimitDescription, RateLimitStatus};

use crate::client::SumoLogicApi;
use crate::models::{ApiPage, CreateUserRequest, RoleResponse, ServiceAccountResponse, UserResponse};
use crate::transport::RateLimited;
use crate::SumoLogicError;

type Queue<T> = Mutex<VecDeque<RateLimited<T>>>;

/// Serves queued outcomes per operation and records every call.
///
/// A call with nothing queued panics, so tests also assert which calls were
/// not made.
#[derive(Default)]
pub(crate) struct MockApi {
    calls: Mutex<Vec<String>>,
    list_users: Queue<ApiPage<UserResponse>>,
    get_user: Queue<UserResponse>,
    create_user: Queue<UserResponse>,
    delete_user: Queue<()>,
    list_service_accounts: Queue<Vec<ServiceAccountResponse>>,
    list_roles: Queue<ApiPage<RoleResponse>>,
    get_role: Queue<RoleResponse>,
    assign_role_to_user: Queue<RoleResponse>,
    remove_role_from_user: Queue<()>,
}

impl MockApi {
    pub(crate) fn on_list_users(self, outcome: RateLimited<ApiPage<UserResponse>>) -> Self {
        push(&self.list_users, outcome);
        self
    }

    pub(crate) fn on_get_user(self, outcome: RateLimited<UserResponse>) -> Self {
        push(&self.get_user, outcome);
        self
    }

    pub(crate) fn on_create_user(self, outcome: RateLimited<UserResponse>) -> Self {
        push(&self.create_user, outcome);
        self
    }

    pub(crate) fn on_delete_user(self, outcome: RateLimited<()>) -> Self {
        push(&self.delete_user, outcome);
        self
    }

    pub(crate) fn on_list_service_accounts(
        self,
        outcome: RateLimited<Vec<ServiceAccountResponse>>,
    ) -> Self {
        push(&self.list_service_accounts, outcome);
        self
    }

    pub(crate) fn on_list_roles(self, outcome: RateLimited<ApiPage<RoleResponse>>) -> Self {
        push(&self.list_roles, outcome);
        self
    }

    pub(crate) fn on_get_role(self, outcome: RateLimited<RoleResponse>) -> Self {
        push(&self.get_role, outcome);
        self
    }

    pub(crate) fn on_assign_role_to_user(self, outcome: RateLimited<RoleResponse>) -> Self {
        push(&self.assign_role_to_user, outcome);
        self
    }

    pub(crate) fn on_remove_role_from_user(self, outcome: RateLimited<()>) -> Self {
        push(&self.remove_role_from_user, outcome);
        self
    }

    /// Calls made so far, e.g. `get_user(u1)`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(&self, queue: &Queue<T>, call: String) -> RateLimited<T> {
        self.calls.lock().unwrap().push(call.clone());
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call: {call}"))
    }
}

fn push<T>(queue: &Queue<T>, outcome: RateLimited<T>) {
    queue.lock().unwrap().push_back(outcome);
}

/// Rate-limit data reporting quota left.
pub(crate) fn within_quota() -> RateLimitDescription {
    RateLimitDescription {
        status: RateLimitStatus::Ok,
        limit: Some(240),
        remaining: Some(200),
        reset_at: None,
    }
}

pub(crate) fn ok<T>(value: T) -> RateLimited<T> {
    RateLimited::ok(Some(within_quota()), value)
}

pub(crate) fn api_error<T>(status: u16, code: &str) -> RateLimited<T> {
    RateLimited::new(
        Some(RateLimitDescription::default()),
        Err(SumoLogicError::Api {
            status,
            code: code.to_string(),
            message: format!("{code} error"),
            target: None,
        }),
    )
}

pub(crate) fn page<T>(records: Vec<T>, next_token: Option<&str>) -> RateLimited<ApiPage<T>> {
    ok(ApiPage {
        records,
        next_token: next_token.map(ToString::to_string),
    })
}

#[async_trait]
impl SumoLogicApi for MockApi {
    async fn list_users(&self, page_token: Option<&str>) -> RateLimited<ApiPage<UserResponse>> {
        self.next(
            &self.list_users,
            format!("list_users({})", page_token.unwrap_or_default()),
        )
    }

    async fn get_user(&self, user_id: &str) -> RateLimited<UserResponse> {
        self.next(&self.get_user, format!("get_user({user_id})"))
    }

    async fn create_user(&self, request: &CreateUserRequest) -> RateLimited<UserResponse> {
        self.next(&self.create_user, format!("create_user({})", request.email))
    }

    async fn delete_user(&self, user_id: &str) -> RateLimited<()> {
        self.next(&self.delete_user, format!("delete_user({user_id})"))
    }

    async fn list_service_accounts(&self) -> RateLimited<Vec<ServiceAccountResponse>> {
        self.next(&self.list_service_accounts, "list_service_accounts()".to_string())
    }

    async fn list_roles(&self, page_token: Option<&str>) -> RateLimited<ApiPage<RoleResponse>> {
        self.next(
            &self.list_roles,
            format!("list_roles({})", page_token.unwrap_or_default()),
        )
    }

    async fn get_role(&self, role_id: &str) -> RateLimited<RoleResponse> {
        self.next(&self.get_role, format!("get_role({role_id})"))
    }

    async fn assign_role_to_user(&self, role_id: &str, user_id: &str) -> RateLimited<RoleResponse> {
        self.next(
            &self.assign_role_to_user,
            format!("assign_role_to_user({role_id}, {user_id})"),
        )
    }

    async fn remove_role_from_user(&self, role_id: &str, user_id: &str) -> RateLimited<()> {
        self.next(
            &self.remove_role_from_user,
            format!("remove_role_from_user({role_id}, {user_id})"),
        )
    }
}
