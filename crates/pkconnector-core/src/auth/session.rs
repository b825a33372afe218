//! Session store
//!
//! Holds the authentication flag and the signed-in user, mirrors both into the
//! key-value store, and restores them on construction.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::credentials::MockCredentialStore;
use crate::error::Result;
use crate::events::{Observers, SubscriptionId};
use crate::routing::{Navigation, Navigator, LOGIN_PATH};
use crate::storage::KeyValueStore;
use crate::users::User;

/// Storage key of the JSON-encoded signed-in user
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Storage key of the authentication flag
pub const IS_AUTHENTICATED_KEY: &str = "isAuthenticated";

/// The only value of [`IS_AUTHENTICATED_KEY`] that counts as signed in
pub const AUTHENTICATED_MARKER: &str = "true";

/// Read access to session state, used by the guard and the views
pub trait SessionView {
    fn is_logged_in(&self) -> bool;
    fn current_user(&self) -> Option<&User>;
}

/// In-memory session. `authenticated` implies a current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }
}

/// What changed in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    LoggedIn(User),
    LoggedOut,
    Cleared,
}

/// Session change with the time it happened
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub timestamp: DateTime<Utc>,
    pub change: SessionChange,
}

/// Authentication state backed by a key-value store
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    credentials: MockCredentialStore,
    session: Session,
    observers: Observers<SessionEvent>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Build the store and restore any persisted session from `storage`
    pub fn new(storage: S, credentials: MockCredentialStore) -> Self {
        let session = restore(&storage);
        Self {
            storage,
            credentials,
            session,
            observers: Observers::new(),
        }
    }

    /// Check `email`/`password` against the credential store. On success the
    /// session is persisted and `true` returned; otherwise nothing changes.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let Some(user) = self.credentials.verify(email, password).cloned() else {
            info!("Login rejected");
            return Ok(false);
        };

        let encoded = serde_json::to_string(&user)?;
        self.storage.set(CURRENT_USER_KEY, &encoded)?;
        if let Err(e) = self.storage.set(IS_AUTHENTICATED_KEY, AUTHENTICATED_MARKER) {
            // Both keys or neither
            if let Err(rollback) = self.storage.remove(CURRENT_USER_KEY) {
                warn!(error = %rollback, "Could not roll back persisted user");
            }
            return Err(e);
        }

        self.session = Session::signed_in(user.clone());
        info!(user_id = user.id, email = %user.email, "Login succeeded");
        self.emit(SessionChange::LoggedIn(user));
        Ok(true)
    }

    /// Forget the session and send the navigator to the login screen
    pub fn logout(&mut self, navigator: &mut dyn Navigator) -> Result<()> {
        let result = self.reset(SessionChange::LoggedOut);
        info!("Logged out");
        navigator.navigate(Navigation::to(LOGIN_PATH));
        result
    }

    /// Forget the session without navigating
    pub fn clear(&mut self) -> Result<()> {
        self.reset(SessionChange::Cleared)
    }

    /// In-memory flag first, then the persisted flag. Never writes.
    pub fn is_logged_in(&self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        match self.storage.get(IS_AUTHENTICATED_KEY) {
            Ok(flag) => flag.as_deref() == Some(AUTHENTICATED_MARKER),
            Err(e) => {
                warn!(error = %e, "Could not read authentication flag");
                false
            }
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn credentials(&self) -> &MockCredentialStore {
        &self.credentials
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Remove both keys, then reset memory even if a removal failed
    fn reset(&mut self, change: SessionChange) -> Result<()> {
        let removed_user = self.storage.remove(CURRENT_USER_KEY);
        let removed_flag = self.storage.remove(IS_AUTHENTICATED_KEY);

        self.session = Session::anonymous();
        self.emit(change);

        removed_user.and(removed_flag)
    }

    fn emit(&mut self, change: SessionChange) {
        self.observers.notify(&SessionEvent {
            timestamp: Utc::now(),
            change,
        });
    }
}

impl<S: KeyValueStore> SessionView for SessionStore<S> {
    fn is_logged_in(&self) -> bool {
        SessionStore::is_logged_in(self)
    }

    fn current_user(&self) -> Option<&User> {
        SessionStore::current_user(self)
    }
}

/// Rebuild the session from storage. Anything incomplete or malformed yields
/// an anonymous session; storage is left as found.
fn restore<S: KeyValueStore>(storage: &S) -> Session {
    let stored_user = match storage.get(CURRENT_USER_KEY) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Could not read persisted user");
            None
        }
    };
    let flag = match storage.get(IS_AUTHENTICATED_KEY) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Could not read authentication flag");
            None
        }
    };

    match (stored_user, flag.as_deref()) {
        (Some(json), Some(AUTHENTICATED_MARKER)) => match serde_json::from_str::<User>(&json) {
            Ok(user) => {
                info!(user_id = user.id, email = %user.email, "Session restored");
                Session::signed_in(user)
            }
            Err(e) => {
                warn!(error = %e, "Persisted user is malformed, starting signed out");
                Session::anonymous()
            }
        },
        _ => {
            debug!("No persisted session");
            Session::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::routing::RecordingNavigator;
    use crate::storage::MemoryStore;
    use crate::users::{Role, UserStatus};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> SessionStore<MemoryStore> {
        SessionStore::new(MemoryStore::new(), MockCredentialStore::demo())
    }

    fn admin() -> User {
        MockCredentialStore::demo()
            .verify("admin@empresa.com", "admin123")
            .cloned()
            .unwrap()
    }

    /// Store whose writes always fail
    #[derive(Debug, Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("read-only".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(Error::Storage("read-only".to_string()))
        }
    }

    #[test]
    fn test_starts_signed_out() {
        let session = store();
        assert!(!session.is_logged_in());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_login_success_persists() {
        let mut session = store();
        assert!(session.login("admin@empresa.com", "admin123").unwrap());

        assert!(session.is_logged_in());
        assert_eq!(session.current_user(), Some(&admin()));

        let storage = session.storage();
        assert_eq!(
            storage.get(IS_AUTHENTICATED_KEY).unwrap().as_deref(),
            Some("true")
        );
        let persisted: User =
            serde_json::from_str(&storage.get(CURRENT_USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted.email, "admin@empresa.com");
    }

    #[test]
    fn test_login_failure_leaves_state_untouched() {
        let mut session = store();
        session.login("usuario@empresa.com", "password").unwrap();
        let before_user = session.storage().get(CURRENT_USER_KEY).unwrap();

        assert!(!session.login("admin@empresa.com", "wrong").unwrap());
        assert!(!session.login("ghost@empresa.com", "admin123").unwrap());

        assert_eq!(session.current_user().unwrap().email, "usuario@empresa.com");
        assert_eq!(session.storage().get(CURRENT_USER_KEY).unwrap(), before_user);
    }

    #[test]
    fn test_logout_clears_and_navigates() {
        let mut session = store();
        session.login("admin@empresa.com", "admin123").unwrap();

        let mut nav = RecordingNavigator::new();
        session.logout(&mut nav).unwrap();

        assert!(!session.is_logged_in());
        assert!(session.current_user().is_none());
        assert!(session.storage().is_empty());
        assert_eq!(nav.last(), Some(&Navigation::to("/login")));
    }

    #[test]
    fn test_logout_when_signed_out() {
        let mut session = store();
        let mut nav = RecordingNavigator::new();
        session.logout(&mut nav).unwrap();
        assert!(!session.is_logged_in());
        assert_eq!(nav.requests.len(), 1);
    }

    #[test]
    fn test_restore_from_storage() {
        let storage = MemoryStore::with_entries([
            (CURRENT_USER_KEY, serde_json::to_string(&admin()).unwrap()),
            (IS_AUTHENTICATED_KEY, "true".to_string()),
        ]);
        let session = SessionStore::new(storage, MockCredentialStore::demo());

        assert!(session.is_logged_in());
        assert_eq!(session.current_user(), Some(&admin()));
    }

    #[test]
    fn test_restore_requires_literal_true() {
        let storage = MemoryStore::with_entries([
            (CURRENT_USER_KEY, serde_json::to_string(&admin()).unwrap()),
            (IS_AUTHENTICATED_KEY, "TRUE".to_string()),
        ]);
        let session = SessionStore::new(storage, MockCredentialStore::demo());
        assert!(session.current_user().is_none());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_restore_malformed_user_is_anonymous() {
        let storage = MemoryStore::with_entries([
            (CURRENT_USER_KEY, "{\"id\": \"oops\""),
            (IS_AUTHENTICATED_KEY, "true"),
        ]);
        let session = SessionStore::new(storage, MockCredentialStore::demo());

        assert!(session.current_user().is_none());
        assert!(!session.session().is_authenticated());
        // Restoration does not write back; the stale keys are still there.
        assert_eq!(session.storage().len(), 2);
    }

    #[test]
    fn test_is_logged_in_falls_back_to_storage_flag() {
        // Flag present without a user: restore stays anonymous, but the
        // read-only fallback still reports signed in.
        let storage = MemoryStore::with_entries([(IS_AUTHENTICATED_KEY, "true")]);
        let session = SessionStore::new(storage, MockCredentialStore::demo());

        assert!(session.is_logged_in());
        assert!(session.current_user().is_none());
        assert!(!session.session().is_authenticated());
    }

    /// Store that refuses to write the authentication flag
    #[derive(Debug, Default)]
    struct FlagRejectingStore(MemoryStore);

    impl KeyValueStore for FlagRejectingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if key == IS_AUTHENTICATED_KEY {
                return Err(Error::Storage("flag not writable".to_string()));
            }
            self.0.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_failed_flag_write_removes_persisted_user() {
        let mut session =
            SessionStore::new(FlagRejectingStore::default(), MockCredentialStore::demo());

        assert!(session.login("admin@empresa.com", "admin123").is_err());

        assert!(session.current_user().is_none());
        assert_eq!(session.storage().get(CURRENT_USER_KEY).unwrap(), None);
        assert_eq!(session.storage().get(IS_AUTHENTICATED_KEY).unwrap(), None);
    }

    #[test]
    fn test_login_storage_failure_keeps_memory() {
        let mut session = SessionStore::new(ReadOnlyStore::default(), MockCredentialStore::demo());
        let err = session.login("admin@empresa.com", "admin123").unwrap_err();
        assert_eq!(err.code(), "E100");
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_logout_storage_failure_still_resets_memory() {
        let storage = ReadOnlyStore(MemoryStore::with_entries([
            (CURRENT_USER_KEY, serde_json::to_string(&admin()).unwrap()),
            (IS_AUTHENTICATED_KEY, "true".to_string()),
        ]));
        let mut session = SessionStore::new(storage, MockCredentialStore::demo());
        let mut nav = RecordingNavigator::new();

        assert!(session.logout(&mut nav).is_err());
        assert!(session.current_user().is_none());
        assert_eq!(nav.requests.len(), 1);
    }

    #[test]
    fn test_observers_see_login_and_logout() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = store();
        let sink = Rc::clone(&seen);
        session.subscribe(move |e| sink.borrow_mut().push(e.change.clone()));

        session.login("admin@empresa.com", "nope").unwrap();
        session.login("admin@empresa.com", "admin123").unwrap();
        session.clear().unwrap();
        session.logout(&mut RecordingNavigator::new()).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionChange::LoggedIn(admin()),
                SessionChange::Cleared,
                SessionChange::LoggedOut,
            ]
        );
    }

    #[test]
    fn test_session_invariant() {
        let user = User {
            id: 9,
            name: "Test".to_string(),
            email: "t@empresa.com".to_string(),
            company: "X".to_string(),
            role: Role::Viewer,
            status: UserStatus::Active,
        };
        let session = Session::signed_in(user);
        assert!(session.is_authenticated());
        assert!(session.current_user().is_some());
        assert!(!Session::anonymous().is_authenticated());
    }
}
