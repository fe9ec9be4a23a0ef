use liberalia_catalog::error::CatalogError;
use liberalia_catalog::usecase::affiliation::{
    AffiliateUseCase, CreatePublisherInput, CreatePublisherUseCase, ListAffiliationsUseCase,
    UnaffiliateUseCase,
};
use uuid::Uuid;

use crate::helpers::{
    MockAffiliationRepo, MockDirectory, MockPublisherRepo, publisher, test_account,
};

// ── CreatePublisherUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_create_publisher_with_trimmed_fields() {
    let publishers = MockPublisherRepo::default();
    let usecase = CreatePublisherUseCase {
        publishers: publishers.clone(),
    };

    let created = usecase
        .execute(CreatePublisherInput {
            name: "  Editorial Planeta ".into(),
            tax_id: Some("  ".into()),
        })
        .await
        .unwrap();

    assert_eq!(created.name, "Editorial Planeta");
    assert_eq!(created.tax_id, None);
    assert_eq!(publishers.publishers.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_blank_or_oversized_publisher() {
    let usecase = CreatePublisherUseCase {
        publishers: MockPublisherRepo::default(),
    };

    let result = usecase
        .execute(CreatePublisherInput {
            name: " ".into(),
            tax_id: Some("9".repeat(51)),
        })
        .await;
    let Err(CatalogError::InvalidForm(fields)) = result else {
        panic!("expected InvalidForm");
    };
    let names: Vec<_> = fields.iter().map(|f| f.field).collect();
    assert_eq!(names, ["name", "tax_id"]);
}

// ── AffiliateUseCase / UnaffiliateUseCase ────────────────────────────────────

#[tokio::test]
async fn should_affiliate_idempotently() {
    let account = test_account("editor@planeta.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let affiliations = MockAffiliationRepo::default();
    let usecase = AffiliateUseCase {
        accounts: dir.account_repo(),
        publishers: MockPublisherRepo::new(vec![publisher(1, "Planeta")]),
        affiliations: affiliations.clone(),
    };

    usecase.execute(account.id, 1).await.unwrap();
    usecase.execute(account.id, 1).await.unwrap();

    assert_eq!(affiliations.pair_count(), 1);
}

#[tokio::test]
async fn should_refuse_affiliation_with_unknown_user_or_publisher() {
    let account = test_account("editor@planeta.com");
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let affiliations = MockAffiliationRepo::default();
    let usecase = AffiliateUseCase {
        accounts: dir.account_repo(),
        publishers: MockPublisherRepo::new(vec![publisher(1, "Planeta")]),
        affiliations: affiliations.clone(),
    };

    let unknown_user = usecase.execute(Uuid::new_v4(), 1).await;
    let unknown_publisher = usecase.execute(account.id, 99).await;

    assert!(matches!(unknown_user, Err(CatalogError::UserNotFound)));
    assert!(matches!(unknown_publisher, Err(CatalogError::PublisherNotFound)));
    assert_eq!(affiliations.pair_count(), 0);
}

#[tokio::test]
async fn should_unaffiliate_existing_pair_only() {
    let user_id = Uuid::new_v4();
    let affiliations = MockAffiliationRepo::new(vec![(user_id, 1)], vec![]);
    let usecase = UnaffiliateUseCase {
        affiliations: affiliations.clone(),
    };

    usecase.execute(user_id, 1).await.unwrap();
    let again = usecase.execute(user_id, 1).await;

    assert!(matches!(again, Err(CatalogError::AffiliationNotFound)));
    assert_eq!(affiliations.pair_count(), 0);
}

// ── ListAffiliationsUseCase ──────────────────────────────────────────────────

#[tokio::test]
async fn should_list_affiliated_publishers_by_name() {
    let account = test_account("editor@x.com");
    let other = Uuid::new_v4();
    let dir = MockDirectory::with_accounts(vec![account.clone()]);
    let usecase = ListAffiliationsUseCase {
        accounts: dir.account_repo(),
        affiliations: MockAffiliationRepo::new(
            vec![(account.id, 2), (account.id, 1), (other, 3)],
            vec![
                publisher(1, "Planeta"),
                publisher(2, "Anagrama"),
                publisher(3, "Sudamericana"),
            ],
        ),
    };

    let list = usecase.execute(account.id).await.unwrap();
    let names: Vec<_> = list.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Anagrama", "Planeta"]);
}

#[tokio::test]
async fn should_not_list_affiliations_of_unknown_user() {
    let usecase = ListAffiliationsUseCase {
        accounts: MockDirectory::default().account_repo(),
        affiliations: MockAffiliationRepo::default(),
    };
    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(CatalogError::UserNotFound)));
}
