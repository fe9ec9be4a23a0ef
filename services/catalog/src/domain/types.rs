use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::prelude::Decimal;
use serde::Serialize;
use uuid::Uuid;

use liberalia_domain::listing::SortKey;

/// Login account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    /// Stored lower-cased.
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publishing house ("editorial").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    pub id: i32,
    pub name: String,
    pub tax_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// Reference tables a book record points into.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Lookups {
    pub binding_types: Vec<LookupEntry>,
    pub countries: Vec<LookupEntry>,
    pub currencies: Vec<LookupEntry>,
    pub languages: Vec<LookupEntry>,
}

/// One line of a panel listing or CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListRow {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher_name: String,
    pub edition_date: Option<NaiveDate>,
}

/// Which publishers' records a listing may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherScope {
    All,
    /// Never empty: an empty affiliation set short-circuits before querying.
    Only(Vec<i32>),
}

/// Filters and ordering of a catalog listing. All text needles are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFilter {
    pub scope: PublisherScope,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    /// Case-sensitive substring of the stored ISBN.
    pub isbn_contains: Option<String>,
    /// Case-insensitive substring of the publisher name.
    pub publisher_contains: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort: SortKey,
}

impl Default for BookFilter {
    fn default() -> Self {
        Self {
            scope: PublisherScope::All,
            title_contains: None,
            isbn_contains: None,
            publisher_contains: None,
            date_from: None,
            date_to: None,
            sort: SortKey::default(),
        }
    }
}

/// Editable fields of a book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub isbn: String,
    pub ean: Option<String>,
    pub publisher_id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub prologue_author: Option<String>,
    pub translator: Option<String>,
    pub illustrator: Option<String>,
    pub binding_type_id: i32,
    pub page_count: i32,
    pub height_cm: Option<Decimal>,
    pub width_cm: Option<Decimal>,
    pub thickness_cm: Option<Decimal>,
    pub weight_g: Option<i32>,
    pub original_language_id: i32,
    pub edition_number: i32,
    pub edition_date: Option<NaiveDate>,
    pub country_id: i32,
    pub print_number: Option<i32>,
    pub topic: Option<String>,
    pub price: Decimal,
    pub currency_id: i32,
    pub distributor_discount: Decimal,
    pub summary: String,
    pub image_code: Option<String>,
    pub age_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub data: BookData,
}

/// A book with its references resolved to display values.
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub publisher_name: String,
    pub binding_type_name: String,
    pub original_language_name: String,
    pub country_name: String,
    pub currency_code: String,
    pub currency_symbol: Option<String>,
}

/// Validation message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "this field is required")
    }
}

/// Minimum length of a new password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// `minlength` hint of the login form. Advisory only: the server checks the hash.
pub const LOGIN_PASSWORD_MIN_LEN: usize = 6;

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PUBLISHER_NAME_MAX_LEN: usize = 150;
pub const TAX_ID_MAX_LEN: usize = 50;

/// 1 to 150 characters: letters, digits and `@ . + - _`.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (1..=USERNAME_MAX_LEN).contains(&len)
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Shape check only: one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Lookup key for an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
