use liberalia_auth_types::password::verify_password;
use liberalia_auth_types::token::validate_session_token;
use liberalia_catalog::error::CatalogError;
use liberalia_catalog::usecase::login::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
};
use liberalia_testing::auth::TEST_SESSION_SECRET;

use crate::helpers::{MockDirectory, TEST_PASSWORD, test_account};

fn login_usecase(dir: &MockDirectory) -> LoginUseCase<crate::helpers::MockAccountRepo> {
    LoginUseCase {
        accounts: dir.account_repo(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
    }
}

fn credentials(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.into(),
        password: password.into(),
    }
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_session_for_valid_credentials() {
    let account = test_account("a@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);

    let output = login_usecase(&dir)
        .execute(credentials("a@x.com", TEST_PASSWORD))
        .await
        .unwrap();

    assert_eq!(output.user_id, account.id);
    let info = validate_session_token(&output.session_token, TEST_SESSION_SECRET).unwrap();
    assert_eq!(info.user_id, account.id);
    assert_eq!(info.expires_at, output.expires_at);
}

#[tokio::test]
async fn should_match_email_case_insensitively() {
    let account = test_account("a@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);

    let output = login_usecase(&dir)
        .execute(credentials("  A@X.COM ", TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(output.user_id, account.id);
}

#[tokio::test]
async fn should_not_distinguish_unknown_email_from_wrong_password() {
    let dir = MockDirectory::with_accounts(vec![test_account("a@x.com")]);
    let usecase = login_usecase(&dir);

    let wrong_password = usecase
        .execute(credentials("a@x.com", "wrong-password"))
        .await;
    let unknown_email = usecase
        .execute(credentials("nadie@x.com", TEST_PASSWORD))
        .await;

    assert!(matches!(wrong_password, Err(CatalogError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(CatalogError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_inactive_account_generically() {
    let mut account = test_account("a@x.com");
    account.is_active = false;
    let dir = MockDirectory::with_accounts(vec![account]);

    let result = login_usecase(&dir)
        .execute(credentials("a@x.com", TEST_PASSWORD))
        .await;
    assert!(matches!(result, Err(CatalogError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_blank_form_before_lookup() {
    let dir = MockDirectory::default();
    let result = login_usecase(&dir).execute(credentials("", "")).await;

    let Err(CatalogError::InvalidForm(fields)) = result else {
        panic!("expected InvalidForm");
    };
    assert_eq!(fields.len(), 2);
}

// ── ChangePasswordUseCase ────────────────────────────────────────────────────

fn change(old: &str, new1: &str, new2: &str) -> ChangePasswordInput {
    ChangePasswordInput {
        old_password: old.into(),
        new_password1: new1.into(),
        new_password2: new2.into(),
    }
}

#[tokio::test]
async fn should_change_password() {
    let account = test_account("a@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = ChangePasswordUseCase {
        accounts: dir.account_repo(),
    };

    usecase
        .execute(account.id, change(TEST_PASSWORD, "nueva-clave-1", "nueva-clave-1"))
        .await
        .unwrap();

    let stored = dir.accounts.lock().unwrap()[0].password_hash.clone();
    assert!(verify_password("nueva-clave-1", &stored));
    assert!(!verify_password(TEST_PASSWORD, &stored));
}

#[tokio::test]
async fn should_refuse_password_change_for_inactive_account() {
    let mut account = test_account("a@x.com");
    account.is_active = false;
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = ChangePasswordUseCase {
        accounts: dir.account_repo(),
    };

    let result = usecase
        .execute(account.id, change(TEST_PASSWORD, "nueva-clave-1", "nueva-clave-1"))
        .await;

    assert!(matches!(result, Err(CatalogError::UserNotFound)));
    let stored = dir.accounts.lock().unwrap()[0].password_hash.clone();
    assert!(verify_password(TEST_PASSWORD, &stored));
}

#[tokio::test]
async fn should_reject_password_change_with_wrong_old_password() {
    let account = test_account("a@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = ChangePasswordUseCase {
        accounts: dir.account_repo(),
    };

    let result = usecase
        .execute(account.id, change("nope", "nueva-clave-1", "nueva-clave-1"))
        .await;
    let Err(CatalogError::InvalidForm(fields)) = result else {
        panic!("expected InvalidForm");
    };
    assert_eq!(fields[0].field, "old_password");
}

#[tokio::test]
async fn should_reject_mismatched_or_short_new_password() {
    let account = test_account("a@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = ChangePasswordUseCase {
        accounts: dir.account_repo(),
    };

    let mismatch = usecase
        .execute(account.id, change(TEST_PASSWORD, "nueva-clave-1", "nueva-clave-2"))
        .await;
    let Err(CatalogError::InvalidForm(fields)) = mismatch else {
        panic!("expected InvalidForm");
    };
    assert_eq!(fields[0].field, "new_password2");

    let short = usecase
        .execute(account.id, change(TEST_PASSWORD, "corta", "corta"))
        .await;
    let Err(CatalogError::InvalidForm(fields)) = short else {
        panic!("expected InvalidForm");
    };
    assert_eq!(fields[0].field, "new_password1");
}
