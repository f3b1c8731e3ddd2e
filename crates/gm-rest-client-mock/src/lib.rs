//! Mock client backed by canned scenario data
//!
//! Implements [`ClientApi`] without any I/O so state-container and
//! bootstrap tests can drive every success and failure path
//! deterministically. Response messages mirror the real backend's.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use gm_client_api::{ClientApi, ClientApiError, ClientApiResult, ForwardedCookies};
use gm_rest_api_contract::*;
use uuid::Uuid;

fn ok<T>(message: &str, data: T) -> ApiEnvelope<T> {
    ApiEnvelope {
        success: true,
        message: message.to_string(),
        data: Some(data),
    }
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 15, 10, 0, 0).unwrap()
}

/// Canned fixtures shared by tests across the workspace
pub mod fixtures {
    use super::*;

    pub fn user() -> User {
        User {
            id: Uuid::parse_str("6f8ee5b1-93cc-4c4f-9d3c-0a0f6b6f0a01").unwrap(),
            username: "admin".to_string(),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        }
    }

    pub fn session() -> UserSession {
        UserSession {
            id: Uuid::parse_str("aa1fe2c7-41d5-4b89-93e0-7f1b4f6d2b02").unwrap(),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        }
    }

    pub fn repository(name: &str) -> Repository {
        Repository {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: format!("https://git.example.com/{name}.git"),
            is_enabled: true,
            git_source: format!("git@github.com:demo/{name}.git"),
            git_source_secret_key: None,
            git_target: format!("git@mirror.example.com:{name}.git"),
            git_target_secret_key: "target-key".to_string(),
            git_clone_period_seconds: 3600,
            last_clone_at: None,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        }
    }

    pub fn new_repository(name: &str) -> NewRepository {
        NewRepository {
            name: name.to_string(),
            url: format!("https://git.example.com/{name}.git"),
            is_enabled: true,
            git_source: format!("git@github.com:demo/{name}.git"),
            git_source_secret_key: None,
            git_target: format!("git@mirror.example.com:{name}.git"),
            git_target_secret_key: "target-key".to_string(),
            git_clone_period_seconds: 3600,
        }
    }
}

/// Scenario-configurable [`ClientApi`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    user: Option<User>,
    session: Option<UserSession>,
    repositories: Vec<Repository>,
    dashboard: Option<DashboardData>,
    unhealthy: bool,
    unauthorized_sentinel: bool,
    missing_data: bool,
    failing: bool,
}

impl MockClient {
    /// Healthy backend with no authenticated session and no repositories
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `user` as the authenticated principal
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_session(mut self, session: UserSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_repositories(mut self, repositories: Vec<Repository>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_dashboard(mut self, dashboard: DashboardData) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    /// `/health` refuses connections
    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    /// `/me` answers 2xx with the `"Unauthorized"` sentinel and no data
    pub fn unauthorized_sentinel(mut self) -> Self {
        self.unauthorized_sentinel = true;
        self
    }

    /// Every envelope op answers 2xx success with `data` absent
    pub fn missing_data(mut self) -> Self {
        self.missing_data = true;
        self
    }

    /// Every operation fails at the transport level
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn transport_guard(&self) -> ClientApiResult<()> {
        if self.failing {
            Err(ClientApiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn empty<T>(&self, message: &str) -> ApiEnvelope<T> {
        ApiEnvelope {
            success: true,
            message: message.to_string(),
            data: None,
        }
    }

    fn auth_envelope(&self, message: &str) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        if self.unauthorized_sentinel {
            return Ok(ApiEnvelope {
                success: false,
                message: UNAUTHORIZED_MESSAGE.to_string(),
                data: None,
            });
        }
        if self.missing_data {
            return Ok(self.empty(message));
        }
        match &self.user {
            Some(user) => Ok(ok(
                message,
                AuthPayload {
                    user: Some(user.clone()),
                    session: self.session.clone(),
                },
            )),
            None => Err(ClientApiError::Status {
                status: 401,
                message: UNAUTHORIZED_MESSAGE.to_string(),
            }),
        }
    }

    fn find_repository(&self, id: Uuid) -> ClientApiResult<Repository> {
        self.repositories
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ClientApiError::Status {
                status: 404,
                message: "Repository not found".to_string(),
            })
    }
}

#[async_trait]
impl ClientApi for MockClient {
    async fn health(&self) -> ClientApiResult<()> {
        if self.unhealthy {
            return Err(ClientApiError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    async fn login(&self, _request: &LoginRequest) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        self.transport_guard()?;
        match &self.user {
            Some(_) => self.auth_envelope("Login successful"),
            None => Err(ClientApiError::Status {
                status: 403,
                message: "Access forbidden".to_string(),
            }),
        }
    }

    async fn logout(&self) -> ClientApiResult<()> {
        self.transport_guard()
    }

    async fn get_me(
        &self,
        _forwarded: Option<&ForwardedCookies>,
    ) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        self.transport_guard()?;
        self.auth_envelope("Success")
    }

    async fn change_password(
        &self,
        _request: &ChangePasswordRequest,
    ) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        self.transport_guard()?;
        self.auth_envelope("Password changed")
    }

    async fn get_repositories(&self) -> ClientApiResult<ApiEnvelope<RepositoriesPayload>> {
        self.transport_guard()?;
        if self.missing_data {
            return Ok(self.empty("Repositories fetched successfully"));
        }
        Ok(ok(
            "Repositories fetched successfully",
            RepositoriesPayload {
                repositories: self.repositories.clone(),
            },
        ))
    }

    async fn add_repository(
        &self,
        data: &NewRepository,
    ) -> ClientApiResult<ApiEnvelope<CreatedRepositoryPayload>> {
        self.transport_guard()?;
        if self.missing_data {
            return Ok(self.empty("Repository added successfully"));
        }
        let created = Repository {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            url: data.url.clone(),
            is_enabled: data.is_enabled,
            git_source: data.git_source.clone(),
            git_source_secret_key: data.git_source_secret_key.clone(),
            git_target: data.git_target.clone(),
            git_target_secret_key: data.git_target_secret_key.clone(),
            git_clone_period_seconds: data.git_clone_period_seconds,
            last_clone_at: None,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        Ok(ok(
            "Repository added successfully",
            CreatedRepositoryPayload {
                created_repository: created,
            },
        ))
    }

    async fn get_repository(
        &self,
        id: Uuid,
        _forwarded: Option<&ForwardedCookies>,
    ) -> ClientApiResult<ApiEnvelope<RepositoryPayload>> {
        self.transport_guard()?;
        let repository = self.find_repository(id)?;
        Ok(ok(
            "Repository fetched successfully",
            RepositoryPayload { repository },
        ))
    }

    async fn get_repository_logs(
        &self,
        id: Uuid,
    ) -> ClientApiResult<ApiEnvelope<RepositoryLogsPayload>> {
        self.transport_guard()?;
        self.find_repository(id)?;
        Ok(ok(
            "Logs fetched successfully",
            RepositoryLogsPayload {
                repository_logs: vec![],
            },
        ))
    }

    async fn delete_repository(&self, id: Uuid) -> ClientApiResult<ApiEnvelope<RepositoryPayload>> {
        self.transport_guard()?;
        let repository = self.find_repository(id)?;
        Ok(ok(
            "Repository deleted successfully",
            RepositoryPayload { repository },
        ))
    }

    async fn get_dashboard_data(&self) -> ClientApiResult<ApiEnvelope<DashboardPayload>> {
        self.transport_guard()?;
        let dashboard = self.dashboard.clone().unwrap_or_else(|| {
            let enabled = self.repositories.iter().filter(|r| r.is_enabled).count() as u32;
            DashboardData {
                total_repositories: self.repositories.len() as u32,
                enabled,
                disabled: self.repositories.len() as u32 - enabled,
                last_cloned_repos: self.repositories.clone(),
                daily_logs: vec![],
                daily_error_logs: vec![],
            }
        });
        Ok(ok("Success", DashboardPayload { dashboard }))
    }
}
