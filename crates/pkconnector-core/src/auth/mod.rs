//! Authentication
//!
//! # Architecture
//!
//! - **Credentials**: `MockCredentialStore`, the static account table
//! - **Session**: `SessionStore`, authentication state persisted in a
//!   `KeyValueStore` and restored on construction
//! - **Guard**: `auth_guard`, which refuses guarded navigation for signed-out
//!   sessions and redirects to `/login?returnUrl=...`
//! - **Login**: `submit_login`, the login screen's submit handler
//!
//! # Example
//!
//! ```ignore
//! use pkconnector_core::auth::{MockCredentialStore, SessionStore};
//! use pkconnector_core::routing::Router;
//! use pkconnector_core::storage::MemoryStore;
//!
//! let mut session = SessionStore::new(MemoryStore::new(), MockCredentialStore::demo());
//! let mut router = Router::new();
//!
//! // Blocked: redirected to /login?returnUrl=/users
//! router.navigate_by_url(&session, "/users");
//!
//! session.login("admin@empresa.com", "admin123")?;
//! router.navigate_by_url(&session, "/users");
//!
//! session.logout(&mut router)?;
//! ```

pub mod credentials;
pub mod guard;
pub mod login;
pub mod session;

pub use credentials::{Account, CredentialRecord, MockCredentialStore};
pub use guard::auth_guard;
pub use login::{post_login_destination, submit_login, LoginOutcome, INVALID_CREDENTIALS_MESSAGE};
pub use session::{
    Session, SessionChange, SessionEvent, SessionStore, SessionView, AUTHENTICATED_MARKER,
    CURRENT_USER_KEY, IS_AUTHENTICATED_KEY,
};
