//! List ↔ form editing workflow
//!
//! `EditWorkflow` is the `{Idle, Creating, Editing}` state machine behind the
//! user form modal. `UsersConsole` pairs it with the registry and consumes the
//! intents emitted by the view: edit, delete, save, cancel and start-create.

use tracing::{debug, info};

use super::registry::UserRegistry;
use super::user::{User, UserFormData};
use crate::error::{Error, Result};
use crate::forms::{validate_user_data, UserForm};

/// State of the user form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    /// No form open
    #[default]
    Idle,
    /// Blank form for a new user
    Creating,
    /// Form pre-filled with an existing user
    Editing(User),
}

impl EditState {
    fn describe(&self) -> &'static str {
        match self {
            Self::Idle => "no form is open",
            Self::Creating => "creating a user",
            Self::Editing(_) => "editing a user",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Transition rules of the form modal
#[derive(Debug, Clone, Default)]
pub struct EditWorkflow {
    state: EditState,
}

impl EditWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Idle → Creating
    pub fn start_create(&mut self) -> Result<()> {
        self.require_idle("start creating")?;
        self.state = EditState::Creating;
        Ok(())
    }

    /// Idle → Editing(user)
    pub fn start_edit(&mut self, user: User) -> Result<()> {
        self.require_idle("start editing")?;
        self.state = EditState::Editing(user);
        Ok(())
    }

    /// Creating|Editing → Idle, handing back the state that was closed
    pub fn finish(&mut self, action: &'static str) -> Result<EditState> {
        if self.state.is_idle() {
            return Err(Error::InvalidTransition {
                action,
                state: self.state.describe(),
            });
        }
        Ok(std::mem::take(&mut self.state))
    }

    fn require_idle(&self, action: &'static str) -> Result<()> {
        if self.state.is_idle() {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                action,
                state: self.state.describe(),
            })
        }
    }
}

/// Asks the operator to confirm a destructive action
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Message shown before deleting `user`
pub fn delete_confirmation_message(user: &User) -> String {
    format!("Are you sure you want to delete {}?", user.name)
}

/// Inputs the view sends to the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleIntent {
    StartCreate,
    Edit(User),
    Delete(User),
    Save(UserFormData),
    Cancel,
}

/// What a handled intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    FormOpened,
    Created(u64),
    Updated(u64),
    Deleted(u64),
    DeleteDeclined,
    Cancelled,
    /// The target id no longer exists; nothing changed
    Ignored,
}

/// Registry plus form workflow, driven by view intents
#[derive(Debug)]
pub struct UsersConsole {
    registry: UserRegistry,
    workflow: EditWorkflow,
    form: Option<UserForm>,
}

impl UsersConsole {
    pub fn new(registry: UserRegistry) -> Self {
        Self {
            registry,
            workflow: EditWorkflow::new(),
            form: None,
        }
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut UserRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> &EditState {
        self.workflow.state()
    }

    /// The open form, if any
    pub fn form(&self) -> Option<&UserForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut UserForm> {
        self.form.as_mut()
    }

    /// Route a view intent to the matching operation
    pub fn dispatch(
        &mut self,
        intent: ConsoleIntent,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<IntentOutcome> {
        match intent {
            ConsoleIntent::StartCreate => self.start_create(),
            ConsoleIntent::Edit(user) => self.edit(user),
            ConsoleIntent::Delete(user) => Ok(self.delete(&user, prompt)),
            ConsoleIntent::Save(data) => self.save(data),
            ConsoleIntent::Cancel => self.cancel(),
        }
    }

    pub fn start_create(&mut self) -> Result<IntentOutcome> {
        self.workflow.start_create()?;
        self.form = Some(UserForm::create());
        debug!("Create form opened");
        Ok(IntentOutcome::FormOpened)
    }

    pub fn edit(&mut self, user: User) -> Result<IntentOutcome> {
        let form = UserForm::edit(&user);
        let id = user.id;
        self.workflow.start_edit(user)?;
        self.form = Some(form);
        debug!(user_id = id, "Edit form opened");
        Ok(IntentOutcome::FormOpened)
    }

    /// Validate and apply the form, then close it. Invalid data keeps the
    /// form open.
    pub fn save(&mut self, data: UserFormData) -> Result<IntentOutcome> {
        if self.workflow.state().is_idle() {
            return Err(Error::InvalidTransition {
                action: "save",
                state: "no form is open",
            });
        }
        validate_user_data(&data)?;

        let closed = self.workflow.finish("save")?;
        self.form = None;

        let outcome = match closed {
            EditState::Creating => IntentOutcome::Created(self.registry.create(data).id),
            EditState::Editing(user) => {
                if self.registry.update(user.id, data) {
                    IntentOutcome::Updated(user.id)
                } else {
                    IntentOutcome::Ignored
                }
            }
            EditState::Idle => IntentOutcome::Ignored,
        };
        Ok(outcome)
    }

    pub fn cancel(&mut self) -> Result<IntentOutcome> {
        self.workflow.finish("cancel")?;
        self.form = None;
        debug!("Form cancelled");
        Ok(IntentOutcome::Cancelled)
    }

    /// Delete `user` once the prompt confirms
    pub fn delete(&mut self, user: &User, prompt: &mut dyn ConfirmPrompt) -> IntentOutcome {
        if !prompt.confirm(&delete_confirmation_message(user)) {
            info!(user_id = user.id, "Delete declined");
            return IntentOutcome::DeleteDeclined;
        }
        if self.registry.delete(user.id) {
            IntentOutcome::Deleted(user.id)
        } else {
            IntentOutcome::Ignored
        }
    }
}

impl Default for UsersConsole {
    fn default() -> Self {
        Self::new(UserRegistry::seeded())
    }
}
