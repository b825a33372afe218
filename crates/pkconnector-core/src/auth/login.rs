//! Login screen submission

use tracing::debug;

use super::session::SessionStore;
use crate::error::Result;
use crate::forms::{LoginForm, ValidationErrors};
use crate::routing::{resolve, Navigation, Navigator, RouteMatch, DASHBOARD_PATH};
use crate::storage::KeyValueStore;

/// Message shown for any rejected login
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Result of submitting the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The form did not validate; no login was attempted
    Invalid(ValidationErrors),
    /// The credentials were rejected
    Rejected { message: &'static str },
    /// Signed in and navigated to `destination`
    Succeeded { destination: Navigation },
}

/// Where to go after signing in: the guarded route named by `return_url`,
/// or the dashboard.
pub fn post_login_destination(return_url: Option<&str>) -> Navigation {
    match return_url.map(resolve) {
        Some(RouteMatch::Route(route)) if route.is_guarded() => Navigation::to(route.path()),
        _ => Navigation::to(DASHBOARD_PATH),
    }
}

/// Validate the form, attempt the login and navigate on success
pub fn submit_login<S: KeyValueStore>(
    session: &mut SessionStore<S>,
    navigator: &mut dyn Navigator,
    form: &LoginForm,
    return_url: Option<&str>,
) -> Result<LoginOutcome> {
    if let Err(errors) = form.validate() {
        debug!(errors = %errors, "Login form invalid");
        return Ok(LoginOutcome::Invalid(errors));
    }

    if !session.login(&form.email, &form.password)? {
        return Ok(LoginOutcome::Rejected {
            message: INVALID_CREDENTIALS_MESSAGE,
        });
    }

    let destination = post_login_destination(return_url);
    navigator.navigate(destination.clone());
    Ok(LoginOutcome::Succeeded { destination })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockCredentialStore;
    use crate::routing::RecordingNavigator;
    use crate::storage::MemoryStore;

    fn store() -> SessionStore<MemoryStore> {
        SessionStore::new(MemoryStore::new(), MockCredentialStore::demo())
    }

    #[test]
    fn test_destination_defaults_to_dashboard() {
        assert_eq!(post_login_destination(None), Navigation::to("/"));
        assert_eq!(post_login_destination(Some("")), Navigation::to("/"));
        assert_eq!(post_login_destination(Some("/login")), Navigation::to("/"));
        assert_eq!(post_login_destination(Some("/nowhere")), Navigation::to("/"));
    }

    #[test]
    fn test_destination_honours_guarded_return_url() {
        assert_eq!(
            post_login_destination(Some("/users?page=2")),
            Navigation::to("/users")
        );
    }

    #[test]
    fn test_invalid_form_skips_login() {
        let mut session = store();
        let mut nav = RecordingNavigator::new();
        let form = LoginForm::new("admin", "admin123");

        let outcome = submit_login(&mut session, &mut nav, &form, None).unwrap();

        assert!(matches!(outcome, LoginOutcome::Invalid(_)));
        assert!(!session.is_logged_in());
        assert!(nav.requests.is_empty());
    }

    #[test]
    fn test_rejected_login_uses_generic_message() {
        let mut session = store();
        let mut nav = RecordingNavigator::new();

        let wrong_password = LoginForm::new("admin@empresa.com", "x");
        let unknown_email = LoginForm::new("ghost@empresa.com", "admin123");

        let a = submit_login(&mut session, &mut nav, &wrong_password, None).unwrap();
        let b = submit_login(&mut session, &mut nav, &unknown_email, None).unwrap();

        assert_eq!(a, b);
        assert_eq!(
            a,
            LoginOutcome::Rejected {
                message: INVALID_CREDENTIALS_MESSAGE
            }
        );
        assert!(nav.requests.is_empty());
    }

    #[test]
    fn test_successful_login_navigates() {
        let mut session = store();
        let mut nav = RecordingNavigator::new();
        let form = LoginForm::new("usuario@empresa.com", "password");

        let outcome = submit_login(&mut session, &mut nav, &form, Some("/users")).unwrap();

        let expected = Navigation::to("/users");
        assert_eq!(
            outcome,
            LoginOutcome::Succeeded {
                destination: expected.clone()
            }
        );
        assert_eq!(nav.last(), Some(&expected));
        assert!(session.is_logged_in());
    }
}
