//! User state container: authenticated principal and sign-in wizard state

use gm_client_api::{ClientApi, ClientApiError, ForwardedCookies};
use gm_rest_api_contract::{User, UserSession};
use thiserror::Error;
use tracing::{debug, error};

/// Why a [`UserStore`] action cleared or refused to populate state
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("API call failed: {0}")]
    Api(#[from] ClientApiError),

    /// The backend answered 2xx carrying the `"Unauthorized"` sentinel
    #[error("user not authorized")]
    Unauthorized,

    /// 2xx envelope without a user payload
    #[error("me response carried no user")]
    MissingUser,
}

/// Transient multi-step sign-in/sign-up wizard state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub screen: String,
    pub email: String,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            screen: "welcome".to_string(),
            email: String::new(),
        }
    }
}

/// Holds the authenticated principal and, on session-aware backends, its
/// server-side session. Both are cleared together.
#[derive(Debug, Default)]
pub struct UserStore {
    user: Option<User>,
    session: Option<UserSession>,
    auth_state: AuthState,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth_state
    }

    /// Derived flag consumed by the route guard
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Fetch the current principal and populate the store.
    ///
    /// On any failure — transport error, error status, the
    /// `"Unauthorized"` sentinel, or a 2xx response without user data —
    /// the store ends up cleared and the cause is returned.
    pub async fn get_me<C: ClientApi>(
        &mut self,
        api: &C,
        forwarded: Option<&ForwardedCookies>,
    ) -> Result<User, UserStoreError> {
        match fetch_me(api, forwarded).await {
            Ok((user, session)) => {
                self.user = Some(user.clone());
                self.session = session;
                Ok(user)
            }
            Err(e) => {
                error!("Failed to restore user session: {}", e);
                self.clear_user();
                Err(e)
            }
        }
    }

    /// End the session. The remote call is best-effort: local state is
    /// cleared whether or not the backend acknowledged the logout.
    pub async fn logout<C: ClientApi>(&mut self, api: &C) -> Result<(), UserStoreError> {
        let outcome = api.logout().await;
        self.clear_user();

        if let Err(e) = outcome {
            error!("Logout call failed, local session cleared anyway: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
        self.session = None;
    }

    pub fn set_auth_state(&mut self, auth_state: AuthState) {
        self.auth_state = auth_state;
    }

    pub fn reset_auth_state(&mut self) {
        self.auth_state = AuthState::default();
    }
}

async fn fetch_me<C: ClientApi>(
    api: &C,
    forwarded: Option<&ForwardedCookies>,
) -> Result<(User, Option<UserSession>), UserStoreError> {
    debug!("fetching current user");
    let envelope = api.get_me(forwarded).await?;

    if envelope.is_unauthorized() {
        return Err(UserStoreError::Unauthorized);
    }

    let payload = envelope.data.ok_or(UserStoreError::MissingUser)?;
    let user = payload.user.ok_or(UserStoreError::MissingUser)?;

    Ok((user, payload.session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_rest_client_mock::{fixtures, MockClient};

    #[tokio::test]
    async fn get_me_populates_user_and_session() {
        let api = MockClient::new()
            .with_user(fixtures::user())
            .with_session(fixtures::session());
        let mut store = UserStore::new();

        let user = store.get_me(&api, None).await.unwrap();

        assert!(store.is_authenticated());
        assert_eq!(user.username, "admin");
        assert_eq!(
            store.user().unwrap().created_at,
            fixtures::user().created_at
        );
        assert_eq!(
            store.user().unwrap().updated_at,
            fixtures::user().updated_at
        );
        assert_eq!(store.session().unwrap().id, fixtures::session().id);
    }

    #[tokio::test]
    async fn get_me_transport_error_clears_state() {
        let api = MockClient::new().failing();
        let mut store = UserStore::new();
        store.set_user(fixtures::user());

        let result = store.get_me(&api, None).await;

        assert!(matches!(result, Err(UserStoreError::Api(_))));
        assert!(!store.is_authenticated());
        assert!(store.session().is_none());
    }

    #[tokio::test]
    async fn get_me_unauthorized_sentinel_clears_state() {
        let api = MockClient::new()
            .with_user(fixtures::user())
            .unauthorized_sentinel();
        let mut store = UserStore::new();
        store.set_user(fixtures::user());

        let result = store.get_me(&api, None).await;

        assert!(matches!(result, Err(UserStoreError::Unauthorized)));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn get_me_missing_user_clears_state() {
        let api = MockClient::new().with_user(fixtures::user()).missing_data();
        let mut store = UserStore::new();
        store.set_user(fixtures::user());

        let result = store.get_me(&api, None).await;

        assert!(matches!(result, Err(UserStoreError::MissingUser)));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn get_me_error_status_clears_state() {
        // No configured user: the mock answers 401 like the real backend
        let api = MockClient::new();
        let mut store = UserStore::new();

        let result = store.get_me(&api, None).await;

        assert!(matches!(result, Err(UserStoreError::Api(_))));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_call_fails() {
        let api = MockClient::new().failing();
        let mut store = UserStore::new();
        store.set_user(fixtures::user());

        let result = store.logout(&api).await;

        assert!(result.is_err());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_state_on_success() {
        let api = MockClient::new().with_user(fixtures::user());
        let mut store = UserStore::new();
        store.set_user(fixtures::user());

        store.logout(&api).await.unwrap();

        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn auth_state_resets_to_welcome() {
        let mut store = UserStore::new();
        store.set_auth_state(AuthState {
            screen: "enter-password".to_string(),
            email: "admin@example.com".to_string(),
        });

        assert_eq!(store.auth_state().screen, "enter-password");

        store.reset_auth_state();
        assert_eq!(store.auth_state().screen, "welcome");
        assert!(store.auth_state().email.is_empty());
    }
}
