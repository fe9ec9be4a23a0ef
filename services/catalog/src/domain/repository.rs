#![allow(async_fn_in_trait)]

use uuid::Uuid;

use liberalia_domain::role::UserRole;

use crate::domain::types::{
    Account, Book, BookData, BookDetail, BookFilter, BookListRow, Lookups, Publisher,
};
use crate::error::CatalogError;

/// Repository for login accounts.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, CatalogError>;

    /// Case-insensitive email match. Inactive accounts are returned too.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, CatalogError>;

    /// Insert the account and its profile in one transaction.
    async fn create_with_profile(
        &self,
        account: &Account,
        role: UserRole,
    ) -> Result<(), CatalogError>;

    /// Persist username, email and active flag.
    async fn update(&self, account: &Account) -> Result<(), CatalogError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), CatalogError>;
}

/// Repository for the one-to-one role profiles.
pub trait ProfileRepository: Send + Sync {
    /// Stored role string, `None` when the user has no profile.
    async fn find_role(&self, user_id: Uuid) -> Result<Option<String>, CatalogError>;

    /// Create a default profile unless one exists. Returns `true` if created.
    async fn ensure(&self, user_id: Uuid) -> Result<bool, CatalogError>;

    /// Set the role, creating the profile if missing.
    async fn set_role(&self, user_id: Uuid, role: UserRole) -> Result<(), CatalogError>;

    /// Create a default profile for every user lacking one. Returns the count created.
    async fn backfill_missing(&self) -> Result<u64, CatalogError>;
}

/// Repository for publishing houses.
pub trait PublisherRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Publisher>, CatalogError>;
    async fn create(&self, name: &str, tax_id: Option<&str>) -> Result<Publisher, CatalogError>;
}

/// Repository for user ↔ publisher affiliations.
pub trait AffiliationRepository: Send + Sync {
    async fn publisher_ids(&self, user_id: Uuid) -> Result<Vec<i32>, CatalogError>;

    /// Affiliated publishers ordered by name.
    async fn list_publishers(&self, user_id: Uuid) -> Result<Vec<Publisher>, CatalogError>;

    /// Idempotent: an existing pair is left untouched.
    async fn affiliate(&self, user_id: Uuid, publisher_id: i32) -> Result<(), CatalogError>;

    /// Returns `true` if a row was deleted.
    async fn unaffiliate(&self, user_id: Uuid, publisher_id: i32) -> Result<bool, CatalogError>;
}

/// Repository for book records and the lookup tables they reference.
pub trait BookRepository: Send + Sync {
    /// Listing rows matching `filter`, at most `limit` when given.
    async fn search(
        &self,
        filter: &BookFilter,
        limit: Option<u64>,
    ) -> Result<Vec<BookListRow>, CatalogError>;

    /// Match `isbn` as given, normalised, or case-insensitively.
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CatalogError>;

    /// Like [`find_by_isbn`](Self::find_by_isbn) with references resolved.
    async fn find_detail(&self, isbn: &str) -> Result<Option<BookDetail>, CatalogError>;

    async fn create(&self, data: &BookData) -> Result<Book, CatalogError>;
    async fn update(&self, id: i32, data: &BookData) -> Result<Book, CatalogError>;

    async fn lookups(&self) -> Result<Lookups, CatalogError>;
}
