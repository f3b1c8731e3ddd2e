//! Client API trait consumed by the state containers and the bootstrap
//!
//! The trait is the seam between application state and the HTTP layer:
//! production code plugs in the REST client, tests plug in the mock.
//! Methods return the backend's response envelope untouched — callers are
//! responsible for inspecting `message` and payload presence.

use async_trait::async_trait;
use gm_rest_api_contract::*;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected: {0}")]
    Unexpected(String),
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// Raw `Cookie` header captured from the incoming request while rendering
/// on the server.
///
/// In the browser the HTTP layer's own cookie store carries credentials;
/// during server-side rendering there is no such store, so the original
/// request's header is forwarded explicitly on the calls that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedCookies(String);

impl ForwardedCookies {
    pub fn new(header: impl Into<String>) -> Self {
        Self(header.into())
    }

    pub fn as_header_value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ForwardedCookies {
    fn from(header: &str) -> Self {
        Self::new(header)
    }
}

#[async_trait]
pub trait ClientApi: Send + Sync {
    /// Liveness probe against `/health` on the base URL
    async fn health(&self) -> ClientApiResult<()>;

    async fn login(&self, request: &LoginRequest) -> ClientApiResult<ApiEnvelope<AuthPayload>>;
    async fn logout(&self) -> ClientApiResult<()>;
    async fn get_me(
        &self,
        forwarded: Option<&ForwardedCookies>,
    ) -> ClientApiResult<ApiEnvelope<AuthPayload>>;
    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ClientApiResult<ApiEnvelope<AuthPayload>>;

    async fn get_repositories(&self) -> ClientApiResult<ApiEnvelope<RepositoriesPayload>>;
    async fn add_repository(
        &self,
        data: &NewRepository,
    ) -> ClientApiResult<ApiEnvelope<CreatedRepositoryPayload>>;
    async fn get_repository(
        &self,
        id: Uuid,
        forwarded: Option<&ForwardedCookies>,
    ) -> ClientApiResult<ApiEnvelope<RepositoryPayload>>;
    async fn get_repository_logs(
        &self,
        id: Uuid,
    ) -> ClientApiResult<ApiEnvelope<RepositoryLogsPayload>>;
    async fn delete_repository(&self, id: Uuid) -> ClientApiResult<ApiEnvelope<RepositoryPayload>>;

    async fn get_dashboard_data(&self) -> ClientApiResult<ApiEnvelope<DashboardPayload>>;
}
