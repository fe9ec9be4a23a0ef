use anyhow::Context as _;
use uuid::Uuid;

use liberalia_auth_types::password::{hash_password, verify_password};
use liberalia_auth_types::token::issue_session_token;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{FieldError, MIN_PASSWORD_LEN, normalize_email, validate_email};
use crate::error::CatalogError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user_id: Uuid,
    pub session_token: String,
    pub expires_at: u64,
}

/// Field-level checks of the login form. Returns the normalised email.
pub fn validate_login(input: &LoginInput) -> Result<String, CatalogError> {
    let mut errors = Vec::new();
    let email = normalize_email(&input.email);
    if email.is_empty() {
        errors.push(FieldError::required("email"));
    } else if !validate_email(&email) {
        errors.push(FieldError::new("email", "enter a valid email address"));
    }
    if input.password.is_empty() {
        errors.push(FieldError::required("password"));
    }
    if errors.is_empty() {
        Ok(email)
    } else {
        Err(CatalogError::InvalidForm(errors))
    }
}

pub struct LoginUseCase<R: AccountRepository> {
    pub accounts: R,
    pub session_secret: String,
}

impl<R: AccountRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, CatalogError> {
        let email = validate_login(&input)?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(|a| a.is_active)
            .ok_or(CatalogError::InvalidCredentials)?;

        if !verify_password(&input.password, &account.password_hash) {
            return Err(CatalogError::InvalidCredentials);
        }

        let (session_token, expires_at) = issue_session_token(account.id, &self.session_secret)
            .context("issue session token")?;
        Ok(LoginOutput {
            user_id: account.id,
            session_token,
            expires_at,
        })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

pub struct ChangePasswordUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> ChangePasswordUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: ChangePasswordInput,
    ) -> Result<(), CatalogError> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(CatalogError::UserNotFound)?;

        if !verify_password(&input.old_password, &account.password_hash) {
            return Err(CatalogError::invalid_field(
                "old_password",
                "your old password was entered incorrectly",
            ));
        }
        if input.new_password1 != input.new_password2 {
            return Err(CatalogError::invalid_field(
                "new_password2",
                "the two password fields didn't match",
            ));
        }
        if input.new_password1.chars().count() < MIN_PASSWORD_LEN {
            return Err(CatalogError::invalid_field(
                "new_password1",
                format!("must contain at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        let hash = hash_password(&input.new_password1).context("hash new password")?;
        self.accounts.update_password(user_id, &hash).await?;
        tracing::info!(%user_id, "password changed");
        Ok(())
    }
}
