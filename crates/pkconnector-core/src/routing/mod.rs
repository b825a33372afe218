//! Routing
//!
//! Route table (`/login` public, `/` and `/users` guarded, everything else
//! redirected to `/login`), navigation requests and the in-process router.

pub mod navigation;
pub mod route;
pub mod router;

pub use navigation::{Navigation, Navigator, RecordingNavigator, RETURN_URL_PARAM};
pub use route::{
    resolve, url_path, Route, RouteMatch, DASHBOARD_PATH, LOGIN_PATH, USERS_PATH,
};
pub use router::{NavigationOutcome, Router};
