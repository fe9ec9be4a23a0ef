pub mod account;
pub mod admin;
pub mod book;
pub mod panel;

use uuid::Uuid;

use liberalia_domain::role::UserRole;

use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::role::ResolveRoleUseCase;

/// Role of the session user, `None` for inactive accounts or without a usable profile.
pub(crate) async fn session_role(
    state: &AppState,
    user_id: Uuid,
) -> Result<Option<UserRole>, CatalogError> {
    ResolveRoleUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
    }
    .execute(user_id)
    .await
}
