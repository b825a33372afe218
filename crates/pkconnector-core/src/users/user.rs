//! User entity and related types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Full access across every client
    #[serde(rename = "SUPER ADMIN", alias = "SUPER_ADMIN")]
    SuperAdmin,
    /// Administers a single client company
    #[serde(rename = "CLIENT ADMIN", alias = "CLIENT_ADMIN")]
    ClientAdmin,
    /// Standard access
    #[default]
    #[serde(rename = "USER")]
    User,
    /// Read-only access
    #[serde(rename = "VIEWER")]
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Self::SuperAdmin, Self::ClientAdmin, Self::User, Self::Viewer];

    /// Parse a role label. Accepts `SUPER ADMIN`, `SUPER_ADMIN` and
    /// `super-admin`, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "SUPER ADMIN" => Some(Self::SuperAdmin),
            "CLIENT ADMIN" => Some(Self::ClientAdmin),
            "USER" => Some(Self::User),
            "VIEWER" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Display label, also the wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER ADMIN",
            Self::ClientAdmin => "CLIENT ADMIN",
            Self::User => "USER",
            Self::Viewer => "VIEWER",
        }
    }

    /// Next role in `ALL`, wrapping around. Used by form cycling.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a user may sign in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user record managed by the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the registry
    pub id: u64,
    /// Full name
    pub name: String,
    /// Email, also the login key
    pub email: String,
    /// Company the user belongs to
    pub company: String,
    pub role: Role,
    pub status: UserStatus,
}

impl User {
    /// Build a user from form data and an assigned id
    pub fn from_form(id: u64, data: UserFormData) -> Self {
        Self {
            id,
            name: data.name,
            email: data.email,
            company: data.company,
            role: data.role,
            status: data.status,
        }
    }

    /// Form data mirroring this user, used to pre-fill the edit form
    pub fn to_form(&self) -> UserFormData {
        UserFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            role: self.role,
            status: self.status,
        }
    }

    /// Merge the fields present in `patch` onto this user
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// User fields submitted by the form; the id is assigned by the registry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserFormData {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserPatch {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    pub fn status(status: UserStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.company.is_none()
            && self.role.is_none()
            && self.status.is_none()
    }
}

impl From<UserFormData> for UserPatch {
    fn from(data: UserFormData) -> Self {
        Self {
            name: Some(data.name),
            email: Some(data.email),
            company: Some(data.company),
            role: Some(data.role),
            status: Some(data.status),
        }
    }
}
