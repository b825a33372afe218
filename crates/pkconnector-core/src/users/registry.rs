//! In-memory user registry
//!
//! Holds the authoritative, insertion-ordered list of users shown by the
//! console. Ids come from a high-water mark: a new id is one past the largest
//! id ever seen, so an id freed by a delete is never handed out again.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::user::{Role, User, UserFormData, UserPatch, UserStatus};
use crate::events::{Observers, SubscriptionId};

/// Change applied to the registry
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryChange {
    Created(User),
    Updated(User),
    Deleted(User),
}

/// Registry change with the time it happened
#[derive(Debug, Clone)]
pub struct RegistryEvent {
    pub timestamp: DateTime<Utc>,
    pub change: RegistryChange,
}

/// Ordered list of users with create/update/delete
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
    last_assigned: u64,
    observers: Observers<RegistryEvent>,
}

impl UserRegistry {
    /// Empty registry; the first created user gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `users` in the given order
    pub fn with_users(users: Vec<User>) -> Self {
        let last_assigned = users.iter().map(|u| u.id).max().unwrap_or(0);
        Self {
            users,
            last_assigned,
            observers: Observers::new(),
        }
    }

    /// Registry pre-loaded with the demo users
    pub fn seeded() -> Self {
        Self::with_users(seed_users())
    }

    /// All users in insertion order
    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users whose name, email or company contains `query`, ignoring case
    pub fn filter(&self, query: &str) -> Vec<&User> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.users.iter().collect();
        }
        self.users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.company.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Id the next `create` will assign
    pub fn next_id(&self) -> u64 {
        let max_existing = self.users.iter().map(|u| u.id).max().unwrap_or(0);
        max_existing.max(self.last_assigned) + 1
    }

    /// Append a new user and return it
    pub fn create(&mut self, data: UserFormData) -> &User {
        let id = self.next_id();
        self.last_assigned = id;
        let user = User::from_form(id, data);

        info!(user_id = id, email = %user.email, "User created");
        self.users.push(user.clone());
        self.emit(RegistryChange::Created(user));

        &self.users[self.users.len() - 1]
    }

    /// Merge `patch` onto the user with `id`. Unknown ids are ignored and
    /// reported as `false`.
    pub fn update(&mut self, id: u64, patch: impl Into<UserPatch>) -> bool {
        let Some(user) = self.users.iter_mut().find(|u| u.id == id) else {
            debug!(user_id = id, "Update ignored, user not found");
            return false;
        };

        user.apply(patch.into());
        let updated = user.clone();

        info!(user_id = id, "User updated");
        self.emit(RegistryChange::Updated(updated));
        true
    }

    /// Remove the user with `id`. Unknown ids are ignored and reported as
    /// `false`.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(idx) = self.users.iter().position(|u| u.id == id) else {
            debug!(user_id = id, "Delete ignored, user not found");
            return false;
        };

        let removed = self.users.remove(idx);
        info!(user_id = id, email = %removed.email, "User deleted");
        self.emit(RegistryChange::Deleted(removed));
        true
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&RegistryEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, change: RegistryChange) {
        self.observers.notify(&RegistryEvent {
            timestamp: Utc::now(),
            change,
        });
    }
}

/// Demo users the console starts with
pub fn seed_users() -> Vec<User> {
    let user = |id: u64, name: &str, email: &str, company: &str, role, status| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        company: company.to_string(),
        role,
        status,
    };

    vec![
        user(
            1,
            "Juan Pérez",
            "juan.perez@empresa.com",
            "Empresa A",
            Role::ClientAdmin,
            UserStatus::Active,
        ),
        user(
            2,
            "María Alvarez",
            "maria.alvarez@empresa.com",
            "Empresa B",
            Role::SuperAdmin,
            UserStatus::Active,
        ),
        user(
            3,
            "Carlos Rodriguez",
            "carlos.rodriguez@empresa.com",
            "Empresa C",
            Role::User,
            UserStatus::Active,
        ),
        user(
            4,
            "Ana Martinez",
            "ana.martinez@empresa.com",
            "Empresa D",
            Role::Viewer,
            UserStatus::Inactive,
        ),
    ]
}
