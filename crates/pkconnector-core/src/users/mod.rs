//! User management
//!
//! - **Entities**: `User`, `Role`, `UserStatus`, `UserFormData`, `UserPatch`
//! - **Registry**: `UserRegistry`, the in-memory ordered list of users
//! - **Workflow**: `EditWorkflow` and `UsersConsole` for the list ↔ form flow
//! - **Avatar**: initials, avatar colors and role badges for the user cards

pub mod avatar;
pub mod registry;
pub mod user;
pub mod workflow;

pub use avatar::{
    avatar_color, initials, role_badge, role_badge_for_label, Avatar, AvatarSize, PaletteColor,
    AVATAR_PALETTE,
};
pub use registry::{seed_users, RegistryChange, RegistryEvent, UserRegistry};
pub use user::{Role, User, UserFormData, UserPatch, UserStatus};
pub use workflow::{
    delete_confirmation_message, ConfirmPrompt, ConsoleIntent, EditState, EditWorkflow,
    IntentOutcome, UsersConsole,
};
