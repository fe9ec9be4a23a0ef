use liberalia_catalog::error::CatalogError;
use liberalia_catalog::usecase::account::{
    BackfillProfilesUseCase, CreateAccountInput, CreateAccountUseCase, EnsureProfileUseCase,
    SaveAccountInput, SaveAccountUseCase, SetRoleUseCase,
};
use liberalia_catalog::usecase::role::ResolveRoleUseCase;
use liberalia_domain::role::UserRole;
use uuid::Uuid;

use crate::helpers::{MockDirectory, test_account};

fn create_input(email: &str, role: Option<UserRole>) -> CreateAccountInput {
    CreateAccountInput {
        username: "ana.garcia".into(),
        email: email.into(),
        password: "s3cret-pass".into(),
        role,
    }
}

// ── CreateAccountUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_account_with_one_consultor_profile() {
    let dir = MockDirectory::default();
    let usecase = CreateAccountUseCase {
        accounts: dir.account_repo(),
    };

    let account = usecase
        .execute(create_input(" Ana@Planeta.com ", None))
        .await
        .unwrap();

    assert_eq!(account.email, "ana@planeta.com");
    assert!(account.is_active);
    assert!(account.password_hash.starts_with("$argon2"));
    assert_eq!(dir.profile_count(), 1);
    assert_eq!(dir.role_of(account.id).as_deref(), Some("CONSULTOR"));
}

#[tokio::test]
async fn should_create_account_with_requested_role() {
    let dir = MockDirectory::default();
    let usecase = CreateAccountUseCase {
        accounts: dir.account_repo(),
    };

    let account = usecase
        .execute(create_input("admin@liberalia.com", Some(UserRole::Admin)))
        .await
        .unwrap();

    assert_eq!(dir.role_of(account.id).as_deref(), Some("ADMIN"));
}

#[tokio::test]
async fn should_report_every_invalid_field() {
    let dir = MockDirectory::default();
    let usecase = CreateAccountUseCase {
        accounts: dir.account_repo(),
    };

    let result = usecase
        .execute(CreateAccountInput {
            username: "ana garcia".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            role: None,
        })
        .await;

    let Err(CatalogError::InvalidForm(fields)) = result else {
        panic!("expected InvalidForm, got {result:?}");
    };
    let names: Vec<_> = fields.iter().map(|f| f.field).collect();
    assert_eq!(names, ["username", "email", "password"]);
    assert_eq!(dir.profile_count(), 0);
}

// ── SaveAccountUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_backfill_profile_when_saving_account_without_one() {
    let account = test_account("legacy@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = SaveAccountUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    };

    usecase
        .execute(account.id, SaveAccountInput::default())
        .await
        .unwrap();
    usecase
        .execute(
            account.id,
            SaveAccountInput {
                is_active: Some(false),
                ..SaveAccountInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(dir.profile_count(), 1);
    assert_eq!(dir.role_of(account.id).as_deref(), Some("CONSULTOR"));
    let stored = dir.accounts.lock().unwrap()[0].clone();
    assert!(!stored.is_active);
}

#[tokio::test]
async fn should_not_reset_existing_role_on_save() {
    let account = test_account("editor@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    dir.profiles
        .lock()
        .unwrap()
        .insert(account.id, "EDITOR".into());
    let usecase = SaveAccountUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    };

    let saved = usecase
        .execute(
            account.id,
            SaveAccountInput {
                email: Some("Nuevo@X.com".into()),
                ..SaveAccountInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(saved.email, "nuevo@x.com");
    assert_eq!(dir.role_of(account.id).as_deref(), Some("EDITOR"));
}

#[tokio::test]
async fn should_fail_saving_unknown_account() {
    let dir = MockDirectory::default();
    let usecase = SaveAccountUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    };

    let result = usecase
        .execute(Uuid::new_v4(), SaveAccountInput::default())
        .await;
    assert!(matches!(result, Err(CatalogError::UserNotFound)));
    assert_eq!(dir.profile_count(), 0);
}

// ── EnsureProfileUseCase / BackfillProfilesUseCase ───────────────────────────

#[tokio::test]
async fn should_ensure_profile_idempotently() {
    let user_id = Uuid::new_v4();
    let dir = MockDirectory::default();
    let usecase = EnsureProfileUseCase {
        profiles: dir.profile_repo(),
    };

    assert!(usecase.execute(user_id).await.unwrap());
    assert!(!usecase.execute(user_id).await.unwrap());
    assert_eq!(dir.profile_count(), 1);
}

#[tokio::test]
async fn should_backfill_only_missing_profiles() {
    let with_profile = test_account("a@x.com");
    let without_1 = test_account("b@x.com");
    let without_2 = test_account("c@x.com");
    let dir = MockDirectory::with_accounts(vec![
        with_profile.clone(),
        without_1.clone(),
        without_2.clone(),
    ]);
    dir.profiles
        .lock()
        .unwrap()
        .insert(with_profile.id, "ADMIN".into());
    let usecase = BackfillProfilesUseCase {
        profiles: dir.profile_repo(),
    };

    assert_eq!(usecase.execute().await.unwrap(), 2);
    assert_eq!(usecase.execute().await.unwrap(), 0);
    assert_eq!(dir.role_of(with_profile.id).as_deref(), Some("ADMIN"));
    assert_eq!(dir.role_of(without_2.id).as_deref(), Some("CONSULTOR"));
}

// ── SetRoleUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_set_role_creating_missing_profile() {
    let account = test_account("b@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = SetRoleUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    };

    usecase.execute(account.id, UserRole::Editor).await.unwrap();
    assert_eq!(dir.role_of(account.id).as_deref(), Some("EDITOR"));
}

#[tokio::test]
async fn should_refuse_role_for_unknown_user() {
    let dir = MockDirectory::default();
    let usecase = SetRoleUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    };

    let result = usecase.execute(Uuid::new_v4(), UserRole::Admin).await;
    assert!(matches!(result, Err(CatalogError::UserNotFound)));
    assert_eq!(dir.profile_count(), 0);
}

// ── Deactivation ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_drop_role_of_deactivated_account() {
    let account = test_account("editor@x.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    SetRoleUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    }
    .execute(account.id, UserRole::Editor)
    .await
    .unwrap();
    let resolve = ResolveRoleUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    };
    assert_eq!(resolve.execute(account.id).await.unwrap(), Some(UserRole::Editor));

    SaveAccountUseCase {
        accounts: dir.account_repo(),
        profiles: dir.profile_repo(),
    }
    .execute(
        account.id,
        SaveAccountInput {
            is_active: Some(false),
            ..SaveAccountInput::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(resolve.execute(account.id).await.unwrap(), None);
    assert_eq!(dir.role_of(account.id).as_deref(), Some("EDITOR"));
}
