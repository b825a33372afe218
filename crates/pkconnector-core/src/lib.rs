//! pkConnector Core Library
//!
//! This crate provides the core functionality of the pkConnector admin
//! console, including:
//! - Session store with local key-value persistence
//! - Route table, router and authentication guard
//! - User registry and the list ↔ form editing workflow
//! - Login and user form validation
//! - Avatar and role badge derivation
//! - Configuration

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod routing;
pub mod storage;
pub mod users;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::auth::{MockCredentialStore, SessionStore, SessionView};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::routing::{Navigation, NavigationOutcome, Navigator, Route, Router};
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
    pub use crate::users::{Role, User, UserFormData, UserRegistry, UserStatus, UsersConsole};
}
