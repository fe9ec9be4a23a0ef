//! User role domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role stored on a user's profile.
///
/// Wire and storage format: the upper-case name (`"ADMIN"`, `"EDITOR"`, `"CONSULTOR"`).
/// New profiles default to [`UserRole::Consultor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Editor,
    #[default]
    Consultor,
}

/// Returned by [`UserRole::from_str`] for unknown role names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Editor, UserRole::Consultor];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Consultor => "CONSULTOR",
        }
    }

    /// Path segment of the role's panel (`/panel/{slug}/`).
    pub fn panel_slug(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Consultor => "consultor",
        }
    }

    pub fn from_panel_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.panel_slug() == slug)
    }

    /// Route the landing page redirects this role to.
    pub fn panel_path(self) -> String {
        format!("/panel/{}/", self.panel_slug())
    }

    /// Roles allowed to download the catalog as CSV.
    pub fn can_download(self) -> bool {
        matches!(self, Self::Admin | Self::Consultor)
    }

    /// Roles allowed to create and edit book records (own publishers only).
    pub fn can_edit_books(self) -> bool {
        matches!(self, Self::Editor)
    }

    /// Editors only see records of the publishers they are affiliated with.
    pub fn is_publisher_scoped(self) -> bool {
        matches!(self, Self::Editor)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}
