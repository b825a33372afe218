//! Route table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the public login screen
pub const LOGIN_PATH: &str = "/login";

/// Path of the dashboard, the post-login landing page
pub const DASHBOARD_PATH: &str = "/";

/// Path of the user management console
pub const USERS_PATH: &str = "/users";

/// Screens reachable through the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Dashboard,
    Users,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::Users => USERS_PATH,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
        }
    }

    /// Guarded routes require an authenticated session
    pub fn is_guarded(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Result of matching a URL against the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Route(Route),
    /// No entry matched; the router sends these to the login screen
    Wildcard,
}

/// Path portion of a URL: query string and fragment removed
pub fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Match a URL against the route table. The query string, a leading slash
/// and a single trailing slash after a non-empty segment are ignored, so
/// `"//"` is a wildcard.
pub fn resolve(url: &str) -> RouteMatch {
    let path = url_path(url);
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };

    match path {
        "" => RouteMatch::Route(Route::Dashboard),
        "login" => RouteMatch::Route(Route::Login),
        "users" => RouteMatch::Route(Route::Users),
        _ => RouteMatch::Wildcard,
    }
}
