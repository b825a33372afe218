//! Navigation requests

use std::fmt;

use super::route::LOGIN_PATH;

/// Query parameter carrying the URL a guard blocked
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// A navigation request: target path plus query parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Login screen remembering `return_url` verbatim
    pub fn login_with_return(return_url: impl Into<String>) -> Self {
        Self::to(LOGIN_PATH).with_query(RETURN_URL_PARAM, return_url)
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn return_url(&self) -> Option<&str> {
        self.query_param(RETURN_URL_PARAM)
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// Anything that can carry out a navigation request
pub trait Navigator {
    fn navigate(&mut self, navigation: Navigation);
}

/// Navigator that only records requests, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    pub requests: Vec<Navigation>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Navigation> {
        self.requests.last()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, navigation: Navigation) {
        self.requests.push(navigation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_with_return_keeps_value_verbatim() {
        for url in ["/users", "", "/", "/users?page=2"] {
            let nav = Navigation::login_with_return(url);
            assert_eq!(nav.path, "/login");
            assert_eq!(nav.return_url(), Some(url));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Navigation::to("/users").to_string(), "/users");
        assert_eq!(
            Navigation::login_with_return("/users").to_string(),
            "/login?returnUrl=/users"
        );
        let nav = Navigation::to("/x").with_query("a", "1").with_query("b", "2");
        assert_eq!(nav.to_string(), "/x?a=1&b=2");
    }

    #[test]
    fn test_recording_navigator() {
        let mut nav = RecordingNavigator::new();
        assert!(nav.last().is_none());
        nav.navigate(Navigation::to("/"));
        nav.navigate(Navigation::to("/users"));
        assert_eq!(nav.requests.len(), 2);
        assert_eq!(nav.last().unwrap().path, "/users");
    }
}
