//! Administrator JSON API under `/admin/`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use liberalia_auth_types::session::SessionUser;
use liberalia_domain::role::UserRole;

use crate::domain::types::{Account, Publisher};
use crate::error::CatalogError;
use crate::handlers::session_role;
use crate::state::AppState;
use crate::usecase::account::{
    CreateAccountInput, CreateAccountUseCase, SaveAccountInput, SaveAccountUseCase,
    SetRoleUseCase,
};
use crate::usecase::affiliation::{
    AffiliateUseCase, CreatePublisherInput, CreatePublisherUseCase, ListAffiliationsUseCase,
    UnaffiliateUseCase,
};

async fn require_admin(state: &AppState, user: &SessionUser) -> Result<(), CatalogError> {
    match session_role(state, user.user_id).await? {
        Some(UserRole::Admin) => Ok(()),
        _ => Err(CatalogError::Forbidden),
    }
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    #[serde(serialize_with = "liberalia_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "liberalia_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for UserResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct PublisherResponse {
    pub id: i32,
    pub name: String,
    pub tax_id: Option<String>,
}

impl From<Publisher> for PublisherResponse {
    fn from(p: Publisher) -> Self {
        Self {
            id: p.id,
            name: p.name,
            tax_id: p.tax_id,
        }
    }
}

// ── POST /admin/users ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}

pub async fn create_user(
    user: SessionUser,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = CreateAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(CreateAccountInput {
            username: body.username,
            email: body.email,
            password: body.password,
            role: body.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

// ── PATCH /admin/users/{user_id} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_user(
    user: SessionUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = SaveAccountUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
    };
    let account = usecase
        .execute(
            user_id,
            SaveAccountInput {
                username: body.username,
                email: body.email,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

// ── PUT /admin/users/{user_id}/role ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

pub async fn set_role(
    user: SessionUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetRoleRequest>,
) -> Result<StatusCode, CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = SetRoleUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
    };
    usecase.execute(user_id, body.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/users/{user_id}/publishers ────────────────────────────────────

pub async fn list_affiliations(
    user: SessionUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PublisherResponse>>, CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = ListAffiliationsUseCase {
        accounts: state.account_repo(),
        affiliations: state.affiliation_repo(),
    };
    let publishers = usecase.execute(user_id).await?;
    Ok(Json(publishers.into_iter().map(Into::into).collect()))
}

// ── POST /admin/users/{user_id}/publishers ───────────────────────────────────

#[derive(Deserialize)]
pub struct AffiliateRequest {
    pub publisher_id: i32,
}

pub async fn affiliate(
    user: SessionUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<AffiliateRequest>,
) -> Result<StatusCode, CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = AffiliateUseCase {
        accounts: state.account_repo(),
        publishers: state.publisher_repo(),
        affiliations: state.affiliation_repo(),
    };
    usecase.execute(user_id, body.publisher_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/users/{user_id}/publishers/{publisher_id} ──────────────────

pub async fn unaffiliate(
    user: SessionUser,
    State(state): State<AppState>,
    Path((user_id, publisher_id)): Path<(Uuid, i32)>,
) -> Result<StatusCode, CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = UnaffiliateUseCase {
        affiliations: state.affiliation_repo(),
    };
    usecase.execute(user_id, publisher_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/publishers ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePublisherRequest {
    pub name: String,
    pub tax_id: Option<String>,
}

pub async fn create_publisher(
    user: SessionUser,
    State(state): State<AppState>,
    Json(body): Json<CreatePublisherRequest>,
) -> Result<(StatusCode, Json<PublisherResponse>), CatalogError> {
    require_admin(&state, &user).await?;
    let usecase = CreatePublisherUseCase {
        publishers: state.publisher_repo(),
    };
    let publisher = usecase
        .execute(CreatePublisherInput {
            name: body.name,
            tax_id: body.tax_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(publisher.into())))
}
