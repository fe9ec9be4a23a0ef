use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use liberalia_auth_types::password::hash_password;
use liberalia_domain::role::UserRole;

use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::types::{
    Account, FieldError, MIN_PASSWORD_LEN, USERNAME_MAX_LEN, normalize_email, validate_email,
    validate_username,
};
use crate::error::CatalogError;

fn check_username(username: &str, errors: &mut Vec<FieldError>) {
    if !validate_username(username) {
        errors.push(FieldError::new(
            "username",
            format!(
                "required, at most {USERNAME_MAX_LEN} characters: letters, digits and @/./+/-/_ only"
            ),
        ));
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if !validate_email(email) {
        errors.push(FieldError::new("email", "enter a valid email address"));
    }
}

// ── CreateAccount ────────────────────────────────────────────────────────────

pub struct CreateAccountInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`UserRole::Consultor`].
    pub role: Option<UserRole>,
}

pub struct CreateAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> CreateAccountUseCase<A> {
    /// Create the account together with its profile.
    pub async fn execute(&self, input: CreateAccountInput) -> Result<Account, CatalogError> {
        let username = input.username.trim().to_owned();
        let email = normalize_email(&input.email);

        let mut errors = Vec::new();
        check_username(&username, &mut errors);
        check_email(&email, &mut errors);
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("must contain at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if !errors.is_empty() {
            return Err(CatalogError::InvalidForm(errors));
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash: hash_password(&input.password).context("hash password")?,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let role = input.role.unwrap_or_default();
        self.accounts.create_with_profile(&account, role).await?;
        tracing::info!(user_id = %account.id, %role, "account created");
        Ok(account)
    }
}

// ── SaveAccount ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SaveAccountInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

pub struct SaveAccountUseCase<A: AccountRepository, P: ProfileRepository> {
    pub accounts: A,
    pub profiles: P,
}

impl<A: AccountRepository, P: ProfileRepository> SaveAccountUseCase<A, P> {
    /// Apply the changes, then make sure the account has a profile.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: SaveAccountInput,
    ) -> Result<Account, CatalogError> {
        let mut account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(CatalogError::UserNotFound)?;

        let mut errors = Vec::new();
        if let Some(username) = input.username {
            account.username = username.trim().to_owned();
            check_username(&account.username, &mut errors);
        }
        if let Some(email) = input.email {
            account.email = normalize_email(&email);
            check_email(&account.email, &mut errors);
        }
        if !errors.is_empty() {
            return Err(CatalogError::InvalidForm(errors));
        }
        if let Some(is_active) = input.is_active {
            account.is_active = is_active;
        }
        account.updated_at = Utc::now();

        self.accounts.update(&account).await?;
        ensure_profile(&self.profiles, user_id).await?;
        Ok(account)
    }
}

// ── EnsureProfile ────────────────────────────────────────────────────────────

async fn ensure_profile<P: ProfileRepository>(
    profiles: &P,
    user_id: Uuid,
) -> Result<bool, CatalogError> {
    let created = profiles.ensure(user_id).await?;
    if created {
        tracing::info!(%user_id, "created missing profile");
    }
    Ok(created)
}

pub struct EnsureProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> EnsureProfileUseCase<P> {
    /// Idempotent. Returns `true` when a profile had to be created.
    pub async fn execute(&self, user_id: Uuid) -> Result<bool, CatalogError> {
        ensure_profile(&self.profiles, user_id).await
    }
}

// ── SetRole ──────────────────────────────────────────────────────────────────

pub struct SetRoleUseCase<A: AccountRepository, P: ProfileRepository> {
    pub accounts: A,
    pub profiles: P,
}

impl<A: AccountRepository, P: ProfileRepository> SetRoleUseCase<A, P> {
    pub async fn execute(&self, user_id: Uuid, role: UserRole) -> Result<(), CatalogError> {
        if self.accounts.find_by_id(user_id).await?.is_none() {
            return Err(CatalogError::UserNotFound);
        }
        self.profiles.set_role(user_id, role).await?;
        tracing::info!(%user_id, %role, "role changed");
        Ok(())
    }
}

// ── BackfillProfiles ─────────────────────────────────────────────────────────

pub struct BackfillProfilesUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> BackfillProfilesUseCase<P> {
    pub async fn execute(&self) -> Result<u64, CatalogError> {
        let created = self.profiles.backfill_missing().await?;
        tracing::info!(created, "profile backfill finished");
        Ok(created)
    }
}
