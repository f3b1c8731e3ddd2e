//! Navigation guard for the authenticated dashboard area

use gm_state::UserStore;

/// Path prefix that requires an authenticated user
pub const PROTECTED_PREFIX: &str = "/dashboard";

/// Where unauthenticated visitors are sent
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Outcome of a navigation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Evaluate a navigation against the current user state.
///
/// Pure and synchronous — runs on every route transition without a
/// network call. Anything outside the protected prefix passes through
/// regardless of authentication.
pub fn guard_route(path: &str, user: &UserStore) -> RouteDecision {
    if !path.starts_with(PROTECTED_PREFIX) {
        return RouteDecision::Allow;
    }

    if user.is_authenticated() {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect(SIGN_IN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_rest_client_mock::fixtures;

    #[test]
    fn dashboard_requires_authentication() {
        let store = UserStore::new();

        assert_eq!(
            guard_route("/dashboard/repositories", &store),
            RouteDecision::Redirect(SIGN_IN_PATH)
        );
        assert_eq!(
            guard_route("/dashboard", &store),
            RouteDecision::Redirect(SIGN_IN_PATH)
        );
    }

    #[test]
    fn authenticated_user_passes_through() {
        let mut store = UserStore::new();
        store.set_user(fixtures::user());

        assert_eq!(
            guard_route("/dashboard/repositories", &store),
            RouteDecision::Allow
        );
    }

    #[test]
    fn public_paths_never_redirect() {
        let mut store = UserStore::new();

        assert_eq!(guard_route("/", &store), RouteDecision::Allow);
        assert_eq!(guard_route("/auth/sign-in", &store), RouteDecision::Allow);
        assert_eq!(guard_route("/public/about", &store), RouteDecision::Allow);

        // Authentication state is irrelevant outside the protected prefix
        store.set_user(fixtures::user());
        assert_eq!(guard_route("/public/about", &store), RouteDecision::Allow);
    }
}
