//! Execution-context aware base URL selection

use gm_client_api::ForwardedCookies;
use url::Url;

use crate::client::ApiClient;

/// Where the calling code is executing.
///
/// Server-side rendering may reach the backend over a different network
/// path than the visitor's browser, so each context gets its own base URL.
/// The context is always passed explicitly by the caller; it is never
/// inferred from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server-side rendering on the hosting machine
    Server,
    /// Browser execution on the visitor's machine
    Browser,
}

/// Public and server-internal base URLs for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base: Url,
    pub server_api_base: Url,
}

impl ApiConfig {
    /// Config whose server-side base URL equals the public one
    pub fn new(api_base: Url) -> Self {
        let server_api_base = api_base.clone();
        Self {
            api_base,
            server_api_base,
        }
    }

    /// Override the base URL used during server-side rendering, for
    /// deployments where the render host reaches the backend on an
    /// internal address.
    pub fn with_server_api_base(mut self, server_api_base: Url) -> Self {
        self.server_api_base = server_api_base;
        self
    }

    pub fn base_url_for(&self, context: ExecutionContext) -> &Url {
        match context {
            ExecutionContext::Server => &self.server_api_base,
            ExecutionContext::Browser => &self.api_base,
        }
    }

    /// Build an [`ApiClient`] against the base URL for `context`.
    pub fn client_for(
        &self,
        context: ExecutionContext,
        forwarded: Option<ForwardedCookies>,
    ) -> ApiClient {
        ApiClient::new(self.base_url_for(context).clone(), forwarded)
    }
}
