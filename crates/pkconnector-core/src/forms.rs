//! Form validation for the login screen and the user form

use std::fmt;

use crate::error::Error;
use crate::users::{User, UserFormData};

/// Minimum length of a user's name, after trimming. Surrounding whitespace
/// does not count, so `" L "` is too short.
pub const MIN_NAME_LEN: usize = 2;

/// Validation failure on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures of a form, in field order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First message reported for `field`
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::InvalidInput(errors.to_string())
    }
}

/// Loose structural email check: one `@`, non-empty local part, and a
/// dotted domain without empty labels or whitespace. A bare host such as
/// `admin@empresa` is rejected on purpose.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

/// Values typed into the login screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.email.is_empty() {
            errors.push("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.push("email", "Enter a valid email");
        }

        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.into_result()
    }
}

/// Whether the user form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

/// The user form: create mode starts blank, edit mode starts from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub mode: FormMode,
    pub data: UserFormData,
}

impl UserForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            data: UserFormData::default(),
        }
    }

    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit(user.id),
            data: user.to_form(),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_user_data(&self.data)
    }

    /// Validated form data, ready for the `save` intent
    pub fn submit(&self) -> Result<UserFormData, ValidationErrors> {
        self.validate()?;
        Ok(self.data.clone())
    }
}

/// Validate user form data
pub fn validate_user_data(data: &UserFormData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = data.name.trim();
    if name.is_empty() {
        errors.push("name", "Name is required");
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.push(
            "name",
            format!("Name must be at least {} characters", MIN_NAME_LEN),
        );
    }

    if data.email.is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(&data.email) {
        errors.push("email", "Enter a valid email");
    }

    if data.company.trim().is_empty() {
        errors.push("company", "Company is required");
    }

    errors.into_result()
}
