//! Endpoint wrappers and the aggregated API client

use async_trait::async_trait;
use gm_client_api::{ClientApi, ClientApiResult, ForwardedCookies};
use gm_rest_api_contract::*;
use reqwest::{redirect, Client as HttpClient};
use url::Url;
use uuid::Uuid;

use crate::error::{RestClientError, RestClientResult};
use crate::scope::{is_success_status, ScopedClient};

/// Scoped client for the `/auth` resource group
#[derive(Debug, Clone)]
pub struct AuthClient {
    scoped: ScopedClient,
}

impl AuthClient {
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> RestClientResult<ApiEnvelope<AuthPayload>> {
        self.scoped.post("/login", request).await
    }

    pub async fn logout(&self) -> RestClientResult<()> {
        self.scoped.post_unit("/logout").await
    }

    pub async fn get_me(
        &self,
        forwarded: Option<&ForwardedCookies>,
    ) -> RestClientResult<ApiEnvelope<AuthPayload>> {
        self.scoped.get_forwarding("/me", forwarded).await
    }
}

/// Scoped client for the `/user` resource group
#[derive(Debug, Clone)]
pub struct UserClient {
    scoped: ScopedClient,
}

impl UserClient {
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> RestClientResult<ApiEnvelope<AuthPayload>> {
        self.scoped.post("/login", request).await
    }

    pub async fn logout(&self) -> RestClientResult<()> {
        self.scoped.post_unit("/logout").await
    }

    /// Current principal. During server-side rendering the incoming
    /// request's `Cookie` header must be passed along, either here or at
    /// client construction.
    pub async fn get_me(
        &self,
        forwarded: Option<&ForwardedCookies>,
    ) -> RestClientResult<ApiEnvelope<AuthPayload>> {
        self.scoped.get_forwarding("/me", forwarded).await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> RestClientResult<ApiEnvelope<AuthPayload>> {
        self.scoped.post("/change-password", request).await
    }
}

/// Scoped client for the `/repository` resource group
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    scoped: ScopedClient,
}

impl RepositoryClient {
    pub async fn get_repositories(&self) -> RestClientResult<ApiEnvelope<RepositoriesPayload>> {
        self.scoped.get("/").await
    }

    pub async fn add_repository(
        &self,
        data: &NewRepository,
    ) -> RestClientResult<ApiEnvelope<CreatedRepositoryPayload>> {
        self.scoped.post("/", data).await
    }

    pub async fn get_repository(
        &self,
        id: Uuid,
        forwarded: Option<&ForwardedCookies>,
    ) -> RestClientResult<ApiEnvelope<RepositoryPayload>> {
        self.scoped.get_forwarding(&format!("/{id}"), forwarded).await
    }

    pub async fn get_repository_logs(
        &self,
        id: Uuid,
    ) -> RestClientResult<ApiEnvelope<RepositoryLogsPayload>> {
        self.scoped.get(&format!("/{id}/logs")).await
    }

    pub async fn delete_repository(
        &self,
        id: Uuid,
    ) -> RestClientResult<ApiEnvelope<RepositoryPayload>> {
        self.scoped.delete(&format!("/{id}")).await
    }
}

/// Scoped client for the `/aggregate` resource group
#[derive(Debug, Clone)]
pub struct AggregateClient {
    scoped: ScopedClient,
}

impl AggregateClient {
    pub async fn get_dashboard_data(&self) -> RestClientResult<ApiEnvelope<DashboardPayload>> {
        self.scoped.get("/dashboard").await
    }
}

/// Aggregated API client: one member per backend resource group.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub auth: AuthClient,
    pub user: UserClient,
    pub repository: RepositoryClient,
    pub aggregate: AggregateClient,
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    /// Create a client scoped to `base_url`, optionally carrying the
    /// forwarded-cookie context of a server-side render.
    pub fn new(base_url: Url, forwarded: Option<ForwardedCookies>) -> Self {
        let http = HttpClient::builder()
            .user_agent("gitmirrors-web/0.1")
            // Browser-style credential handling for the non-SSR context
            .cookie_store(true)
            // 3xx statuses are inside the success range; surface them
            // instead of following
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        let auth = AuthClient {
            scoped: ScopedClient::new(http.clone(), &base_url, "/auth", forwarded.clone()),
        };
        let user = UserClient {
            scoped: ScopedClient::new(http.clone(), &base_url, "/user", forwarded.clone()),
        };
        let repository = RepositoryClient {
            scoped: ScopedClient::new(http.clone(), &base_url, "/repository", forwarded.clone()),
        };
        let aggregate = AggregateClient {
            scoped: ScopedClient::new(http.clone(), &base_url, "/aggregate", forwarded),
        };

        Self {
            auth,
            user,
            repository,
            aggregate,
            http,
            base_url,
        }
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, forwarded: Option<ForwardedCookies>) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(base_url, forwarded))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Liveness probe against `/health` on the base URL. Any transport
    /// failure or non-success status is an error.
    pub async fn health(&self) -> RestClientResult<()> {
        let url = Url::parse(&format!(
            "{}/health",
            self.base_url.as_str().trim_end_matches('/')
        ))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if is_success_status(status) {
            Ok(())
        } else {
            Err(RestClientError::Status {
                status,
                message: "health check failed".to_string(),
            })
        }
    }
}

#[async_trait]
impl ClientApi for ApiClient {
    async fn health(&self) -> ClientApiResult<()> {
        Ok(ApiClient::health(self).await?)
    }

    async fn login(&self, request: &LoginRequest) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        Ok(self.user.login(request).await?)
    }

    async fn logout(&self) -> ClientApiResult<()> {
        Ok(self.user.logout().await?)
    }

    async fn get_me(
        &self,
        forwarded: Option<&ForwardedCookies>,
    ) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        Ok(self.user.get_me(forwarded).await?)
    }

    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ClientApiResult<ApiEnvelope<AuthPayload>> {
        Ok(self.user.change_password(request).await?)
    }

    async fn get_repositories(&self) -> ClientApiResult<ApiEnvelope<RepositoriesPayload>> {
        Ok(self.repository.get_repositories().await?)
    }

    async fn add_repository(
        &self,
        data: &NewRepository,
    ) -> ClientApiResult<ApiEnvelope<CreatedRepositoryPayload>> {
        Ok(self.repository.add_repository(data).await?)
    }

    async fn get_repository(
        &self,
        id: Uuid,
        forwarded: Option<&ForwardedCookies>,
    ) -> ClientApiResult<ApiEnvelope<RepositoryPayload>> {
        Ok(self.repository.get_repository(id, forwarded).await?)
    }

    async fn get_repository_logs(
        &self,
        id: Uuid,
    ) -> ClientApiResult<ApiEnvelope<RepositoryLogsPayload>> {
        Ok(self.repository.get_repository_logs(id).await?)
    }

    async fn delete_repository(&self, id: Uuid) -> ClientApiResult<ApiEnvelope<RepositoryPayload>> {
        Ok(self.repository.delete_repository(id).await?)
    }

    async fn get_dashboard_data(&self) -> ClientApiResult<ApiEnvelope<DashboardPayload>> {
        Ok(self.aggregate.get_dashboard_data().await?)
    }
}
