//! Navigation targets and the guard deciding which ones may render.

use std::fmt;

use crate::auth::AuthStatus;

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Projects,
    ProjectDetail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
        }
    }

    /// Parse a path. Unknown paths resolve to `Home`.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["projects"] => Route::Projects,
            ["projects", id] => id.parse().map(Route::ProjectDetail).unwrap_or(Route::Home),
            _ => Route::Home,
        }
    }

    /// Views reachable only while authenticated.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Projects | Route::ProjectDetail(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of guarding a navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// Status still loading: show a placeholder, decide later.
    Placeholder,
    Render(T),
    Redirect(Route),
}

/// Guard any protected destination on the current status.
pub fn guard<T>(status: AuthStatus, target: T) -> Guarded<T> {
    match status {
        AuthStatus::Loading => Guarded::Placeholder,
        AuthStatus::Authenticated => Guarded::Render(target),
        AuthStatus::Unauthenticated => Guarded::Redirect(Route::Login),
    }
}

/// Resolve a route to what should be shown for it. Public routes always
/// render; `Home` redirects once the status is known.
pub fn resolve(status: AuthStatus, route: Route) -> Guarded<Route> {
    match route {
        Route::Home => match status {
            AuthStatus::Loading => Guarded::Placeholder,
            AuthStatus::Authenticated => Guarded::Redirect(Route::Projects),
            AuthStatus::Unauthenticated => Guarded::Redirect(Route::Login),
        },
        route if route.is_protected() => guard(status, route),
        route => Guarded::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [AuthStatus; 3] = [
        AuthStatus::Loading,
        AuthStatus::Authenticated,
        AuthStatus::Unauthenticated,
    ];

    #[test]
    fn test_parse_and_path_agree() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Projects,
            Route::ProjectDetail(42),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/projects/abc"), Route::Home);
        assert_eq!(Route::parse("/settings"), Route::Home);
        assert_eq!(Route::parse("projects/7/"), Route::ProjectDetail(7));
    }

    #[test]
    fn test_guard_never_renders_unless_authenticated() {
        for status in ALL_STATUSES {
            for route in [Route::Projects, Route::ProjectDetail(1)] {
                let decision = resolve(status, route);
                let rendered = matches!(decision, Guarded::Render(_));
                assert_eq!(rendered, status == AuthStatus::Authenticated, "{:?} {:?}", status, route);
            }
        }
    }

    #[test]
    fn test_guard_decisions() {
        assert_eq!(guard(AuthStatus::Loading, "view"), Guarded::Placeholder);
        assert_eq!(guard(AuthStatus::Authenticated, "view"), Guarded::Render("view"));
        assert_eq!(
            guard(AuthStatus::Unauthenticated, "view"),
            Guarded::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_home_redirects() {
        assert_eq!(resolve(AuthStatus::Loading, Route::Home), Guarded::Placeholder);
        assert_eq!(
            resolve(AuthStatus::Authenticated, Route::Home),
            Guarded::Redirect(Route::Projects)
        );
        assert_eq!(
            resolve(AuthStatus::Unauthenticated, Route::Home),
            Guarded::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_public_routes_always_render() {
        for status in ALL_STATUSES {
            assert_eq!(resolve(status, Route::Login), Guarded::Render(Route::Login));
            assert_eq!(resolve(status, Route::Register), Guarded::Render(Route::Register));
        }
    }
}
