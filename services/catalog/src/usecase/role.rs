use uuid::Uuid;

use liberalia_auth_types::session::LOGIN_PATH;
use liberalia_domain::role::UserRole;

use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::error::CatalogError;

/// Where authenticated callers without the panel's role are sent.
pub const LANDING_PATH: &str = "/";

// ── ResolveRole ──────────────────────────────────────────────────────────────

pub struct ResolveRoleUseCase<A: AccountRepository, P: ProfileRepository> {
    pub accounts: A,
    pub profiles: P,
}

impl<A: AccountRepository, P: ProfileRepository> ResolveRoleUseCase<A, P> {
    /// `None` when the account is gone or inactive, has no profile, or the
    /// stored role is unknown. A deactivated user's live session grants nothing.
    pub async fn execute(&self, user_id: Uuid) -> Result<Option<UserRole>, CatalogError> {
        match self.accounts.find_by_id(user_id).await? {
            Some(account) if account.is_active => {}
            Some(_) => {
                tracing::info!(%user_id, "session of inactive account ignored");
                return Ok(None);
            }
            None => {
                tracing::info!(%user_id, "session of unknown account ignored");
                return Ok(None);
            }
        }
        let Some(stored) = self.profiles.find_role(user_id).await? else {
            return Ok(None);
        };
        match stored.parse::<UserRole>() {
            Ok(role) => Ok(Some(role)),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "profile has an unknown role");
                Ok(None)
            }
        }
    }
}

// ── Panel table ──────────────────────────────────────────────────────────────

/// Per-role panel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub role: UserRole,
    pub title: &'static str,
    pub can_download: bool,
    pub can_edit: bool,
}

pub const PANELS: [PanelSpec; 3] = [
    PanelSpec {
        role: UserRole::Admin,
        title: "Panel de administración",
        can_download: true,
        can_edit: false,
    },
    PanelSpec {
        role: UserRole::Editor,
        title: "Panel de editor",
        can_download: false,
        can_edit: true,
    },
    PanelSpec {
        role: UserRole::Consultor,
        title: "Panel de consulta",
        can_download: true,
        can_edit: false,
    },
];

pub fn panel_for_slug(slug: &str) -> Option<&'static PanelSpec> {
    let role = UserRole::from_panel_slug(slug)?;
    PANELS.iter().find(|p| p.role == role)
}

/// Outcome of the panel access gate for an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAccess {
    Granted,
    /// Redirect to [`LANDING_PATH`].
    WrongRole,
}

pub fn check_panel_access(panel: &PanelSpec, role: Option<UserRole>) -> PanelAccess {
    if role == Some(panel.role) {
        PanelAccess::Granted
    } else {
        PanelAccess::WrongRole
    }
}

/// Landing redirect target: the role's panel, or the login form without a role.
pub fn landing_target(role: Option<UserRole>) -> String {
    match role {
        Some(role) => role.panel_path(),
        None => LOGIN_PATH.to_owned(),
    }
}
