use uuid::Uuid;

use crate::domain::repository::{AccountRepository, AffiliationRepository, PublisherRepository};
use crate::domain::types::{FieldError, PUBLISHER_NAME_MAX_LEN, Publisher, TAX_ID_MAX_LEN};
use crate::error::CatalogError;

// ── CreatePublisher ──────────────────────────────────────────────────────────

pub struct CreatePublisherInput {
    pub name: String,
    pub tax_id: Option<String>,
}

pub struct CreatePublisherUseCase<P: PublisherRepository> {
    pub publishers: P,
}

impl<P: PublisherRepository> CreatePublisherUseCase<P> {
    pub async fn execute(&self, input: CreatePublisherInput) -> Result<Publisher, CatalogError> {
        let name = input.name.trim();
        let tax_id = input
            .tax_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError::required("name"));
        } else if name.chars().count() > PUBLISHER_NAME_MAX_LEN {
            errors.push(FieldError::new(
                "name",
                format!("at most {PUBLISHER_NAME_MAX_LEN} characters"),
            ));
        }
        if tax_id.is_some_and(|t| t.chars().count() > TAX_ID_MAX_LEN) {
            errors.push(FieldError::new(
                "tax_id",
                format!("at most {TAX_ID_MAX_LEN} characters"),
            ));
        }
        if !errors.is_empty() {
            return Err(CatalogError::InvalidForm(errors));
        }

        let publisher = self.publishers.create(name, tax_id).await?;
        tracing::info!(publisher_id = publisher.id, "publisher created");
        Ok(publisher)
    }
}

// ── Affiliate ────────────────────────────────────────────────────────────────

pub struct AffiliateUseCase<A, P, F>
where
    A: AccountRepository,
    P: PublisherRepository,
    F: AffiliationRepository,
{
    pub accounts: A,
    pub publishers: P,
    pub affiliations: F,
}

impl<A, P, F> AffiliateUseCase<A, P, F>
where
    A: AccountRepository,
    P: PublisherRepository,
    F: AffiliationRepository,
{
    /// Idempotent: affiliating twice keeps a single pair.
    pub async fn execute(&self, user_id: Uuid, publisher_id: i32) -> Result<(), CatalogError> {
        if self.accounts.find_by_id(user_id).await?.is_none() {
            return Err(CatalogError::UserNotFound);
        }
        if self.publishers.find_by_id(publisher_id).await?.is_none() {
            return Err(CatalogError::PublisherNotFound);
        }
        self.affiliations.affiliate(user_id, publisher_id).await
    }
}

// ── Unaffiliate ──────────────────────────────────────────────────────────────

pub struct UnaffiliateUseCase<F: AffiliationRepository> {
    pub affiliations: F,
}

impl<F: AffiliationRepository> UnaffiliateUseCase<F> {
    pub async fn execute(&self, user_id: Uuid, publisher_id: i32) -> Result<(), CatalogError> {
        if self.affiliations.unaffiliate(user_id, publisher_id).await? {
            Ok(())
        } else {
            Err(CatalogError::AffiliationNotFound)
        }
    }
}

// ── ListAffiliations ─────────────────────────────────────────────────────────

pub struct ListAffiliationsUseCase<A: AccountRepository, F: AffiliationRepository> {
    pub accounts: A,
    pub affiliations: F,
}

impl<A: AccountRepository, F: AffiliationRepository> ListAffiliationsUseCase<A, F> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Publisher>, CatalogError> {
        if self.accounts.find_by_id(user_id).await?.is_none() {
            return Err(CatalogError::UserNotFound);
        }
        self.affiliations.list_publishers(user_id).await
    }
}
