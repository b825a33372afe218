//! Console state driven by key events
//!
//! Everything the screen shows is derived from `App`: the router decides the
//! page, the session decides who is signed in and the users console owns the
//! list and the open form. Rendering lives in `ui.rs`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pkconnector_core::auth::{submit_login, LoginOutcome, SessionStore};
use pkconnector_core::config::UiConfig;
use pkconnector_core::forms::{LoginForm, UserForm, ValidationErrors};
use pkconnector_core::routing::{NavigationOutcome, Route, Router, DASHBOARD_PATH, USERS_PATH};
use pkconnector_core::storage::KeyValueStore;
use pkconnector_core::users::{AvatarSize, ConsoleIntent, IntentOutcome, User, UsersConsole};
use pkconnector_core::Result;
use tracing::{debug, info, warn};

/// Shown when signing in fails for a reason other than bad credentials
pub const LOGIN_FAILED_MESSAGE: &str = "Could not sign in, please try again";

/// Page currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Users,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::Login => Screen::Login,
            Route::Dashboard => Screen::Dashboard,
            Route::Users => Screen::Users,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login screen inputs
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub errors: Option<ValidationErrors>,
    pub rejection: Option<&'static str>,
    /// Where to go once signed in, taken from the guard's redirect
    pub return_url: Option<String>,
}

impl LoginScreen {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

/// Fields of the user form modal, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Company,
    Role,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Company,
        FormField::Role,
        FormField::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Role => "Role",
            Self::Status => "Status",
        }
    }

    /// Key used by `ValidationErrors` for this field
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Role => "role",
            Self::Status => "status",
        }
    }

    fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct App<S: KeyValueStore> {
    session: SessionStore<S>,
    router: Router,
    console: UsersConsole,
    pub environment_label: String,
    pub avatar_size: AvatarSize,
    pub login: LoginScreen,
    /// Index into the user list
    pub selected: usize,
    pub form_focus: FormField,
    pub form_errors: Option<ValidationErrors>,
    /// User awaiting delete confirmation
    pub pending_delete: Option<User>,
    pub dropdown_open: bool,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Build the console and land on the dashboard, or on the login screen
    /// when no session was restored
    pub fn new(session: SessionStore<S>, ui: &UiConfig) -> Self {
        let mut app = Self {
            session,
            router: Router::new(),
            console: UsersConsole::default(),
            environment_label: ui.environment_label.clone(),
            avatar_size: ui.avatar_size,
            login: LoginScreen::default(),
            selected: 0,
            form_focus: FormField::default(),
            form_errors: None,
            pending_delete: None,
            dropdown_open: false,
            status: None,
            should_quit: false,
        };
        app.open(DASHBOARD_PATH);
        app
    }

    pub fn screen(&self) -> Screen {
        self.router
            .current_route()
            .map(Screen::from)
            .unwrap_or(Screen::Login)
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn console(&self) -> &UsersConsole {
        &self.console
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.console.registry().list().get(self.selected)
    }

    /// Navigate the way the sidebar does
    pub fn open(&mut self, url: &str) {
        let outcome = self.router.navigate_by_url(&self.session, url);
        debug!(url = %url, outcome = ?outcome, "Opened");
        match outcome {
            NavigationOutcome::Blocked { redirect } => {
                self.login = LoginScreen {
                    return_url: redirect.return_url().map(str::to_string),
                    ..LoginScreen::default()
                };
            }
            NavigationOutcome::Redirected { .. } => {
                self.login = LoginScreen::default();
            }
            NavigationOutcome::Entered(_) => {}
        }
        self.dropdown_open = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        if self.pending_delete.is_some() {
            self.handle_confirm_key(key);
            return Ok(());
        }
        if self.console.form().is_some() {
            return self.handle_form_key(key);
        }
        if self.dropdown_open {
            return self.handle_dropdown_key(key);
        }

        match self.screen() {
            Screen::Login => self.handle_login_key(key),
            Screen::Dashboard => {
                self.handle_chrome_key(key);
                Ok(())
            }
            Screen::Users => self.handle_users_key(key),
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.dropdown_open = false;
        self.pending_delete = None;
        if self.console.form().is_some() {
            self.console.cancel()?;
        }
        self.login = LoginScreen::default();
        // The session is forgotten in memory even when storage refuses
        self.status = Some(match self.session.logout(&mut self.router) {
            Ok(()) => "Signed out".to_string(),
            Err(e) => {
                warn!(error = %e, "Logout could not clear stored session");
                format!("Signed out, but the stored session was kept: {}", e)
            }
        });
        Ok(())
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Backspace => {
                self.login.focused_mut().pop();
            }
            KeyCode::Char(c) => self.login.focused_mut().push(c),
            KeyCode::Enter => self.submit_login(),
            _ => {}
        }
        Ok(())
    }

    fn submit_login(&mut self) {
        let form = LoginForm::new(self.login.email.trim(), self.login.password.as_str());
        let return_url = self.login.return_url.clone();

        let outcome = submit_login(
            &mut self.session,
            &mut self.router,
            &form,
            return_url.as_deref(),
        );
        match outcome {
            Err(e) => {
                warn!(error = %e, "Login could not be completed");
                self.login.errors = None;
                self.login.rejection = Some(LOGIN_FAILED_MESSAGE);
                self.status = Some(e.to_string());
            }
            Ok(LoginOutcome::Invalid(errors)) => {
                self.login.errors = Some(errors);
                self.login.rejection = None;
            }
            Ok(LoginOutcome::Rejected { message }) => {
                self.login.errors = None;
                self.login.rejection = Some(message);
                self.login.password.clear();
            }
            Ok(LoginOutcome::Succeeded { destination }) => {
                info!(destination = %destination, "Signed in from the console");
                self.login = LoginScreen::default();
                self.selected = 0;
                self.status = None;
            }
        }
    }

    /// Keys shared by every signed-in page. Returns whether the key was used.
    fn handle_chrome_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('u') => self.dropdown_open = true,
            KeyCode::Char('1') => self.open(DASHBOARD_PATH),
            KeyCode::Char('2') => self.open(USERS_PATH),
            _ => return false,
        }
        true
    }

    fn handle_dropdown_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('l') | KeyCode::Enter => self.logout()?,
            // Any other interaction closes the menu
            _ => self.dropdown_open = false,
        }
        Ok(())
    }

    fn handle_users_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_chrome_key(key) {
            return Ok(());
        }

        let count = self.console.registry().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            KeyCode::Char('n') => {
                self.dispatch(ConsoleIntent::StartCreate)?;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(user) = self.selected_user().cloned() {
                    self.dispatch(ConsoleIntent::Edit(user))?;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.pending_delete = self.selected_user().cloned();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let confirmed = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        let Some(user) = self.pending_delete.take() else {
            return;
        };

        let mut answer = |_: &str| confirmed;
        let outcome = self.console.delete(&user, &mut answer);
        self.report(outcome);
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.dispatch(ConsoleIntent::Cancel)?;
            }
            KeyCode::Tab | KeyCode::Down => self.form_focus = self.form_focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_focus = self.form_focus.prev(),
            KeyCode::Enter => self.save_form()?,
            code => {
                let focus = self.form_focus;
                if let Some(form) = self.console.form_mut() {
                    edit_field(form, focus, code);
                }
            }
        }
        Ok(())
    }

    fn save_form(&mut self) -> Result<()> {
        let Some(form) = self.console.form() else {
            return Ok(());
        };
        if let Err(errors) = form.validate() {
            self.form_errors = Some(errors);
            return Ok(());
        }
        let data = form.data.clone();
        self.dispatch(ConsoleIntent::Save(data))?;
        Ok(())
    }

    fn dispatch(&mut self, intent: ConsoleIntent) -> Result<IntentOutcome> {
        // Deletes are confirmed through the dialog before reaching here
        let mut confirm = |_: &str| true;
        let outcome = self.console.dispatch(intent, &mut confirm)?;
        self.report(outcome);
        Ok(outcome)
    }

    fn report(&mut self, outcome: IntentOutcome) {
        match &outcome {
            IntentOutcome::FormOpened => {
                self.form_focus = FormField::default();
                self.form_errors = None;
            }
            IntentOutcome::Cancelled => self.form_errors = None,
            IntentOutcome::Created(id) => {
                self.form_errors = None;
                self.selected = self.console.registry().len().saturating_sub(1);
                self.status = Some(format!("Created user {}", id));
            }
            IntentOutcome::Updated(id) => {
                self.form_errors = None;
                self.status = Some(format!("Updated user {}", id));
            }
            IntentOutcome::Deleted(id) => {
                let count = self.console.registry().len();
                self.selected = self.selected.min(count.saturating_sub(1));
                self.status = Some(format!("Deleted user {}", id));
            }
            IntentOutcome::DeleteDeclined => self.status = Some("Delete cancelled".to_string()),
            IntentOutcome::Ignored => {}
        }
    }
}

fn edit_field(form: &mut UserForm, field: FormField, code: KeyCode) {
    let data = &mut form.data;
    let text = match field {
        FormField::Name => &mut data.name,
        FormField::Email => &mut data.email,
        FormField::Company => &mut data.company,
        FormField::Role => {
            if matches!(code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                data.role = data.role.next();
            }
            return;
        }
        FormField::Status => {
            if matches!(code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                data.status = data.status.toggled();
            }
            return;
        }
    };
    match code {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkconnector_core::auth::{CURRENT_USER_KEY, IS_AUTHENTICATED_KEY, MockCredentialStore};
    use pkconnector_core::storage::MemoryStore;
    use pkconnector_core::users::{Role, UserStatus};
    use pkconnector_core::Error;

    /// Store whose writes always fail, like a read-only data directory
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

    fn read_only_app(storage: ReadOnlyStore) -> App<ReadOnlyStore> {
        let session = SessionStore::new(storage, MockCredentialStore::demo());
        App::new(session, &UiConfig::default())
    }

    fn app() -> App<MemoryStore> {
        let session = SessionStore::new(MemoryStore::new(), MockCredentialStore::demo());
        App::new(session, &UiConfig::default())
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::from(code)).unwrap();
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn signed_in_app() -> App<MemoryStore> {
        let mut app = app();
        type_text(&mut app, "admin@empresa.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "admin123");
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_starts_on_login_without_session() {
        let app = app();
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.login.return_url.as_deref(), Some("/"));
        assert_eq!(app.environment_label, "TESTING / QA");
    }

    #[test]
    fn test_restored_session_starts_on_dashboard() {
        let mut session = SessionStore::new(MemoryStore::new(), MockCredentialStore::demo());
        session.login("usuario@empresa.com", "password").unwrap();
        let store = session.into_storage();

        let app = App::new(
            SessionStore::new(store, MockCredentialStore::demo()),
            &UiConfig::default(),
        );
        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(app.current_user().unwrap().name, "Usuario");
    }

    #[test]
    fn test_login_flow() {
        let app = signed_in_app();
        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(app.current_user().unwrap().name, "Administrador");
        assert!(app.login.email.is_empty());
    }

    #[test]
    fn test_login_rejection_keeps_email() {
        let mut app = app();
        type_text(&mut app, "admin@empresa.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "nope");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.login.rejection, Some("Invalid credentials"));
        assert_eq!(app.login.email, "admin@empresa.com");
        assert!(app.login.password.is_empty());
    }

    #[test]
    fn test_login_validation_errors() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);

        let errors = app.login.errors.as_ref().unwrap();
        assert!(errors.for_field("email").is_some());
        assert!(errors.for_field("password").is_some());
        assert!(!app.session().is_logged_in());
    }

    #[test]
    fn test_login_backspace_edits_focused_field() {
        let mut app = app();
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.login.email, "ab");
        assert_eq!(app.login.focus, LoginField::Email);
    }

    #[test]
    fn test_sidebar_navigation() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen(), Screen::Users);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_blocked_users_returns_after_login() {
        let mut app = app();
        app.open("/users");
        assert_eq!(app.login.return_url.as_deref(), Some("/users"));

        type_text(&mut app, "admin@empresa.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "admin123");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Users);
    }

    #[test]
    fn test_dropdown_toggle_and_outside_close() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('u'));
        assert!(app.dropdown_open);

        press(&mut app, KeyCode::Char('2'));
        assert!(!app.dropdown_open);
        // The closing key is consumed
        assert_eq!(app.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_dropdown_logout() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Char('l'));

        assert_eq!(app.screen(), Screen::Login);
        assert!(!app.session().is_logged_in());
        assert_eq!(app.session().storage().get(IS_AUTHENTICATED_KEY).unwrap(), None);
        assert_eq!(app.login.return_url, None);
    }

    #[test]
    fn test_user_selection_is_clamped() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected, 3);
        assert_eq!(app.selected_user().unwrap().name, "Ana Martinez");
    }

    #[test]
    fn test_create_user_through_form() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.console().form().is_some());

        type_text(&mut app, "Lucia Gomez");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "lucia@empresa.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Empresa E");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert!(app.console().form().is_none());
        let created = app.console().registry().get(5).unwrap();
        assert_eq!(created.name, "Lucia Gomez");
        assert_eq!(created.role, Role::User.next());
        assert_eq!(app.selected, 4);
        assert_eq!(app.status.as_deref(), Some("Created user 5"));
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "L");
        press(&mut app, KeyCode::Enter);

        assert!(app.console().form().is_some());
        assert!(app.form_errors.as_ref().unwrap().for_field("name").is_some());
        assert_eq!(app.console().registry().len(), 4);
    }

    #[test]
    fn test_edit_status_and_cancel() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.form_focus, FormField::Status);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Esc);

        assert!(app.console().form().is_none());
        assert_eq!(app.console().registry().get(1).unwrap().status, UserStatus::Active);
    }

    #[test]
    fn test_edit_saves_changes() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form_focus, FormField::Status);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.console().registry().get(2).unwrap().status, UserStatus::Inactive);
        assert_eq!(app.status.as_deref(), Some("Updated user 2"));
    }

    #[test]
    fn test_delete_declined_then_confirmed() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.pending_delete.as_ref().unwrap().id, 1);

        // Unrelated keys leave the dialog open
        press(&mut app, KeyCode::Char('x'));
        assert!(app.pending_delete.is_some());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.pending_delete.is_none());
        assert_eq!(app.console().registry().len(), 4);
        assert_eq!(app.status.as_deref(), Some("Delete cancelled"));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.console().registry().get(1).is_none());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_storage_failure_during_login_keeps_console_open() {
        let mut app = read_only_app(ReadOnlyStore::default());
        for c in "admin@empresa.com".chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(KeyEvent::from(KeyCode::Tab)).unwrap();
        for c in "admin123".chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }

        assert!(app.handle_key(KeyEvent::from(KeyCode::Enter)).is_ok());

        assert!(!app.should_quit);
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.login.rejection, Some(LOGIN_FAILED_MESSAGE));
        assert!(app.status.as_deref().unwrap().contains("read-only"));
        assert!(app.current_user().is_none());
    }

    #[test]
    fn test_storage_failure_during_logout_keeps_console_open() {
        let admin = MockCredentialStore::demo()
            .verify("admin@empresa.com", "admin123")
            .cloned()
            .unwrap();
        let mut app = read_only_app(ReadOnlyStore(MemoryStore::with_entries([
            (CURRENT_USER_KEY, serde_json::to_string(&admin).unwrap()),
            (IS_AUTHENTICATED_KEY, "true".to_string()),
        ])));
        assert_eq!(app.screen(), Screen::Dashboard);

        app.handle_key(KeyEvent::from(KeyCode::Char('u'))).unwrap();
        assert!(app.handle_key(KeyEvent::from(KeyCode::Char('l'))).is_ok());

        assert!(!app.should_quit);
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.current_user().is_none());
        assert!(app.status.as_deref().unwrap().contains("stored session was kept"));
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }
}
