//! One-shot server-side initialization per rendered request

use gm_client_api::{ClientApi, ClientApiError, ForwardedCookies};
use gm_rest_client::{ApiConfig, ExecutionContext};
use gm_state::{RepositoryStore, UiStore, UserStore};
use thiserror::Error;
use tracing::{debug, error};

/// Per-request bundle of state containers. Each render owns its own
/// instance; nothing leaks across concurrent requests.
#[derive(Debug, Default)]
pub struct RenderState {
    pub user: UserStore,
    pub repository: RepositoryStore,
    pub ui: UiStore,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The `/health` probe failed. The page must not render against an
    /// indeterminate backend.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[source] ClientApiError),
}

impl BootstrapError {
    /// HTTP status the resulting error page should carry
    pub fn status_code(&self) -> u16 {
        503
    }
}

/// Initialize per-request state ahead of a render.
///
/// Only the `Server` context performs work — the browser receives the
/// server-rendered state and must not repeat initialization. A failed
/// health probe aborts the render; a failed session restore just yields
/// an unauthenticated state.
pub async fn bootstrap<C: ClientApi>(
    api: &C,
    context: ExecutionContext,
    forwarded: Option<&ForwardedCookies>,
) -> Result<RenderState, BootstrapError> {
    if context == ExecutionContext::Browser {
        debug!("browser context, server initialization skipped");
        return Ok(RenderState::default());
    }

    if let Err(e) = api.health().await {
        error!("Server unavailable: {}", e);
        return Err(BootstrapError::BackendUnavailable(e));
    }

    let mut state = RenderState::default();

    // An expired or absent session just renders the signed-out shell
    if state.user.get_me(api, forwarded).await.is_err() {
        debug!("render proceeds unauthenticated");
    }

    Ok(state)
}

/// Production entry point: resolve the base URL for `context`, build a
/// client carrying the incoming request's cookies, and run [`bootstrap`].
pub async fn bootstrap_render(
    config: &ApiConfig,
    context: ExecutionContext,
    forwarded: Option<ForwardedCookies>,
) -> Result<RenderState, BootstrapError> {
    let api = config.client_for(context, forwarded.clone());
    bootstrap(&api, context, forwarded.as_ref()).await
}
