//! Route guard

use tracing::info;

use super::session::SessionView;
use crate::routing::{Navigation, Navigator};

/// Allow navigation to `target_url` when signed in. Otherwise redirect to the
/// login screen with `returnUrl` set to `target_url` exactly as given, and
/// refuse.
pub fn auth_guard<V>(session: &V, navigator: &mut dyn Navigator, target_url: &str) -> bool
where
    V: SessionView + ?Sized,
{
    if session.is_logged_in() {
        return true;
    }

    info!(target = %target_url, "Navigation blocked, redirecting to login");
    navigator.navigate(Navigation::login_with_return(target_url));
    false
}
