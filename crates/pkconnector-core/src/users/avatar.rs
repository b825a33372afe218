//! Avatar and role badge derivation
//!
//! Pure helpers used by the user cards: initials, a name-stable avatar color
//! and the badge color for each role.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::Role;

/// Fixed avatar palette. The order is part of the contract: a name always
/// maps to the same entry.
pub const AVATAR_PALETTE: [PaletteColor; 8] = [
    PaletteColor::Blue,
    PaletteColor::Green,
    PaletteColor::Purple,
    PaletteColor::Pink,
    PaletteColor::Indigo,
    PaletteColor::Red,
    PaletteColor::Yellow,
    PaletteColor::Teal,
];

/// Named colors used by avatars and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Blue,
    Green,
    Purple,
    Pink,
    Indigo,
    Red,
    Yellow,
    Teal,
    Gray,
}

impl PaletteColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Teal => "teal",
            Self::Gray => "gray",
        }
    }

    /// 24-bit RGB approximation for terminals with true color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Blue => (59, 130, 246),
            Self::Green => (34, 197, 94),
            Self::Purple => (168, 85, 247),
            Self::Pink => (236, 72, 153),
            Self::Indigo => (99, 102, 241),
            Self::Red => (239, 68, 68),
            Self::Yellow => (234, 179, 8),
            Self::Teal => (20, 184, 166),
            Self::Gray => (107, 114, 128),
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Avatar size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl AvatarSize {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sm" => Some(Self::Sm),
            "md" => Some(Self::Md),
            "lg" => Some(Self::Lg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    /// Width of the avatar cell, in terminal columns
    pub fn width(&self) -> u16 {
        match self {
            Self::Sm => 4,
            Self::Md => 6,
            Self::Lg => 8,
        }
    }
}

impl fmt::Display for AvatarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Uppercased first letter of the first two space-separated tokens
pub fn initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Palette entry chosen by the sum of the name's UTF-16 code units
pub fn avatar_color(name: &str) -> PaletteColor {
    let sum: u64 = name.encode_utf16().map(u64::from).sum();
    AVATAR_PALETTE[(sum % AVATAR_PALETTE.len() as u64) as usize]
}

/// Everything needed to draw an avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub initials: String,
    pub color: PaletteColor,
    pub size: AvatarSize,
}

impl Avatar {
    pub fn for_name(name: &str, size: AvatarSize) -> Self {
        Self {
            initials: initials(name),
            color: avatar_color(name),
            size,
        }
    }
}

/// Badge color for a role
pub fn role_badge(role: Role) -> PaletteColor {
    match role {
        Role::SuperAdmin => PaletteColor::Purple,
        Role::ClientAdmin => PaletteColor::Blue,
        Role::User => PaletteColor::Green,
        Role::Viewer => PaletteColor::Gray,
    }
}

/// Badge color for a raw role label; unknown labels get gray
pub fn role_badge_for_label(label: &str) -> PaletteColor {
    Role::from_str(label)
        .map(role_badge)
        .unwrap_or(PaletteColor::Gray)
}
