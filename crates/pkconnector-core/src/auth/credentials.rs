//! Mock credential store
//!
//! A static email → password table standing in for an identity provider.
//! Passwords are compared as plain strings.

use crate::users::{Role, User, UserStatus};

/// Email and password of one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub email: String,
    pub password: String,
}

/// A credential paired with the user it signs in as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub credential: CredentialRecord,
    pub user: User,
}

/// Static set of accounts that may sign in
#[derive(Debug, Clone, Default)]
pub struct MockCredentialStore {
    accounts: Vec<Account>,
}

impl MockCredentialStore {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// The two demo accounts: an administrator and a regular user
    pub fn demo() -> Self {
        let account = |id, name: &str, email: &str, password: &str, role| Account {
            credential: CredentialRecord {
                email: email.to_string(),
                password: password.to_string(),
            },
            user: User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                company: "pkConnector".to_string(),
                role,
                status: UserStatus::Active,
            },
        };

        Self::new(vec![
            account(
                1,
                "Administrador",
                "admin@empresa.com",
                "admin123",
                Role::SuperAdmin,
            ),
            account(2, "Usuario", "usuario@empresa.com", "password", Role::User),
        ])
    }

    /// User for `email` if `password` matches exactly. Unknown emails and
    /// wrong passwords are indistinguishable.
    pub fn verify(&self, email: &str, password: &str) -> Option<&User> {
        self.accounts
            .iter()
            .find(|a| a.credential.email == email)
            .filter(|a| a.credential.password == password)
            .map(|a| &a.user)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}
