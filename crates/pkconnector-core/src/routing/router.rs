//! Router: route resolution, guard enforcement and history

use tracing::{debug, info};

use super::navigation::{Navigation, Navigator};
use super::route::{resolve, Route, RouteMatch, LOGIN_PATH};
use crate::auth::{auth_guard, SessionView};

/// Result of [`Router::navigate_by_url`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The route was entered
    Entered(Route),
    /// The guard refused entry and redirected to the login screen
    Blocked { redirect: Navigation },
    /// No route matched; sent to the login screen
    Redirected { to: Navigation },
}

/// In-process router keeping the current location and its history
#[derive(Debug, Clone, Default)]
pub struct Router {
    history: Vec<Navigation>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current location, `None` before the first navigation
    pub fn current(&self) -> Option<&Navigation> {
        self.history.last()
    }

    /// Route of the current location
    pub fn current_route(&self) -> Option<Route> {
        match resolve(&self.current()?.path) {
            RouteMatch::Route(route) => Some(route),
            RouteMatch::Wildcard => None,
        }
    }

    pub fn history(&self) -> &[Navigation] {
        &self.history
    }

    /// Navigate to `url` the way a user would: wildcard paths go to the
    /// login screen and guarded routes consult the session first.
    pub fn navigate_by_url<V>(&mut self, session: &V, url: &str) -> NavigationOutcome
    where
        V: SessionView + ?Sized,
    {
        match resolve(url) {
            RouteMatch::Route(route) if route.is_guarded() => {
                if auth_guard(session, self, url) {
                    self.navigate(Navigation::to(url));
                    NavigationOutcome::Entered(route)
                } else {
                    let redirect = self
                        .current()
                        .cloned()
                        .unwrap_or_else(|| Navigation::login_with_return(url));
                    NavigationOutcome::Blocked { redirect }
                }
            }
            RouteMatch::Route(route) => {
                self.navigate(Navigation::to(url));
                NavigationOutcome::Entered(route)
            }
            RouteMatch::Wildcard => {
                info!(url = %url, "No route matched, redirecting to login");
                let to = Navigation::to(LOGIN_PATH);
                self.navigate(to.clone());
                NavigationOutcome::Redirected { to }
            }
        }
    }
}

impl Navigator for Router {
    fn navigate(&mut self, navigation: Navigation) {
        debug!(to = %navigation, "Navigating");
        self.history.push(navigation);
    }
}
