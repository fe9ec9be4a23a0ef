use std::str::FromStr;

use chrono::NaiveDate;
use sea_orm::prelude::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use liberalia_domain::isbn::{ISBN_MAX_LEN, normalize_isbn};

use crate::domain::repository::{AffiliationRepository, BookRepository};
use crate::domain::types::{Book, BookData, BookDetail, FieldError, Lookups, Publisher};
use crate::error::CatalogError;

// ── Form validation ──────────────────────────────────────────────────────────

/// Book form as submitted. Every field arrives as text; [`BookInput::validate`]
/// turns it into [`BookData`] or a list of field errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookInput {
    pub isbn: String,
    pub ean: String,
    pub publisher_id: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub prologue_author: String,
    pub translator: String,
    pub illustrator: String,
    pub binding_type_id: String,
    pub page_count: String,
    pub height_cm: String,
    pub width_cm: String,
    pub thickness_cm: String,
    pub weight_g: String,
    pub original_language_id: String,
    pub edition_number: String,
    pub edition_date: String,
    pub country_id: String,
    pub print_number: String,
    pub topic: String,
    pub price: String,
    pub currency_id: String,
    pub distributor_discount: String,
    pub summary: String,
    pub image_code: String,
    pub age_range: String,
}

#[derive(Default)]
struct FormCheck {
    errors: Vec<FieldError>,
}

impl FormCheck {
    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn optional_text(&mut self, field: &'static str, value: &str, max: usize) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if value.chars().count() > max {
            self.fail(field, format!("at most {max} characters"));
        }
        Some(value.to_owned())
    }

    fn text(&mut self, field: &'static str, value: &str, max: usize) -> String {
        self.optional_text(field, value, max).unwrap_or_else(|| {
            self.errors.push(FieldError::required(field));
            String::new()
        })
    }

    fn optional_int(&mut self, field: &'static str, value: &str, min: i32) -> Option<i32> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse::<i32>() {
            Ok(n) if n >= min => Some(n),
            Ok(_) => {
                self.fail(field, format!("must be at least {min}"));
                None
            }
            Err(_) => {
                self.fail(field, "enter a whole number");
                None
            }
        }
    }

    fn int(&mut self, field: &'static str, value: &str, min: i32) -> i32 {
        if value.trim().is_empty() {
            self.errors.push(FieldError::required(field));
            return 0;
        }
        self.optional_int(field, value, min).unwrap_or(0)
    }

    /// `digits` total digits, `places` of them after the point, never negative.
    fn optional_decimal(
        &mut self,
        field: &'static str,
        value: &str,
        digits: u32,
        places: u32,
    ) -> Option<Decimal> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let Ok(parsed) = Decimal::from_str(&value.replace(',', ".")) else {
            self.fail(field, "enter a number");
            return None;
        };
        let whole_digits = digits - places;
        if parsed.is_sign_negative() {
            self.fail(field, "must not be negative");
        } else if parsed.scale() > places {
            self.fail(field, format!("at most {places} decimal places"));
        } else if parsed.trunc() >= Decimal::from(10u64.pow(whole_digits)) {
            self.fail(
                field,
                format!("at most {whole_digits} digits before the decimal point"),
            );
        } else {
            return Some(parsed);
        }
        None
    }

    fn decimal(&mut self, field: &'static str, value: &str, digits: u32, places: u32) -> Decimal {
        if value.trim().is_empty() {
            self.errors.push(FieldError::required(field));
            return Decimal::ZERO;
        }
        self.optional_decimal(field, value, digits, places)
            .unwrap_or(Decimal::ZERO)
    }

    fn optional_date(&mut self, field: &'static str, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(field, "enter a date as YYYY-MM-DD");
                None
            }
        }
    }

    fn isbn(&mut self, value: &str) -> String {
        let isbn = normalize_isbn(value);
        if isbn.is_empty() {
            self.errors.push(FieldError::required("isbn"));
        } else if isbn.len() > ISBN_MAX_LEN {
            self.fail("isbn", format!("at most {ISBN_MAX_LEN} characters"));
        } else if !isbn.chars().all(|c| c.is_ascii_alphanumeric()) {
            self.fail("isbn", "only digits and letters besides separators");
        }
        isbn
    }
}

impl BookInput {
    pub fn validate(&self) -> Result<BookData, CatalogError> {
        let mut check = FormCheck::default();
        let max_discount = Decimal::new(999, 1);

        let data = BookData {
            isbn: check.isbn(&self.isbn),
            ean: check.optional_text("ean", &self.ean, 16),
            publisher_id: check.int("publisher_id", &self.publisher_id, 1),
            title: check.text("title", &self.title, 100),
            subtitle: check.optional_text("subtitle", &self.subtitle, 100),
            author: check.text("author", &self.author, 100),
            prologue_author: check.optional_text("prologue_author", &self.prologue_author, 40),
            translator: check.optional_text("translator", &self.translator, 40),
            illustrator: check.optional_text("illustrator", &self.illustrator, 60),
            binding_type_id: check.int("binding_type_id", &self.binding_type_id, 1),
            page_count: check.int("page_count", &self.page_count, 1),
            height_cm: check.optional_decimal("height_cm", &self.height_cm, 5, 2),
            width_cm: check.optional_decimal("width_cm", &self.width_cm, 5, 2),
            thickness_cm: check.optional_decimal("thickness_cm", &self.thickness_cm, 5, 2),
            weight_g: check.optional_int("weight_g", &self.weight_g, 0),
            original_language_id: check.int(
                "original_language_id",
                &self.original_language_id,
                1,
            ),
            edition_number: check.int("edition_number", &self.edition_number, 1),
            edition_date: check.optional_date("edition_date", &self.edition_date),
            country_id: check.int("country_id", &self.country_id, 1),
            print_number: check.optional_int("print_number", &self.print_number, 0),
            topic: check.optional_text("topic", &self.topic, 60),
            price: check.decimal("price", &self.price, 10, 2),
            currency_id: check.int("currency_id", &self.currency_id, 1),
            distributor_discount: check.decimal(
                "distributor_discount",
                &self.distributor_discount,
                4,
                1,
            ),
            summary: check.text("summary", &self.summary, usize::MAX),
            image_code: check.optional_text("image_code", &self.image_code, 120),
            age_range: check.optional_text("age_range", &self.age_range, 30),
        };

        if data.distributor_discount > max_discount {
            check.fail("distributor_discount", "must be between 0.0 and 99.9");
        }
        if check.errors.is_empty() {
            Ok(data)
        } else {
            Err(CatalogError::InvalidForm(check.errors))
        }
    }
}

// ── BookDetail ───────────────────────────────────────────────────────────────

pub struct BookDetailUseCase<B: BookRepository> {
    pub books: B,
}

impl<B: BookRepository> BookDetailUseCase<B> {
    pub async fn execute(&self, isbn: &str) -> Result<BookDetail, CatalogError> {
        self.books
            .find_detail(isbn)
            .await?
            .ok_or(CatalogError::BookNotFound)
    }
}

// ── NewBookForm ──────────────────────────────────────────────────────────────

/// Choices offered by the editor's record form.
pub struct BookFormChoices {
    pub publishers: Vec<Publisher>,
    pub lookups: Lookups,
}

pub struct NewBookFormUseCase<B: BookRepository, F: AffiliationRepository> {
    pub books: B,
    pub affiliations: F,
}

impl<B: BookRepository, F: AffiliationRepository> NewBookFormUseCase<B, F> {
    pub async fn execute(&self, user_id: Uuid) -> Result<BookFormChoices, CatalogError> {
        Ok(BookFormChoices {
            publishers: self.affiliations.list_publishers(user_id).await?,
            lookups: self.books.lookups().await?,
        })
    }
}

// ── CreateBook ───────────────────────────────────────────────────────────────

pub struct CreateBookUseCase<B: BookRepository, F: AffiliationRepository> {
    pub books: B,
    pub affiliations: F,
}

impl<B: BookRepository, F: AffiliationRepository> CreateBookUseCase<B, F> {
    /// The record's publisher must be one of the editor's.
    pub async fn execute(&self, user_id: Uuid, input: &BookInput) -> Result<Book, CatalogError> {
        let data = input.validate()?;
        let allowed = self.affiliations.publisher_ids(user_id).await?;
        if !allowed.contains(&data.publisher_id) {
            return Err(CatalogError::Forbidden);
        }
        let book = self.books.create(&data).await?;
        tracing::info!(%user_id, book_id = book.id, isbn = %book.data.isbn, "book created");
        Ok(book)
    }
}

// ── GetEditableBook / EditBook ───────────────────────────────────────────────

/// Record by ISBN, hidden unless its publisher is affiliated with the editor.
async fn find_editable<B, F>(
    books: &B,
    affiliations: &F,
    user_id: Uuid,
    isbn: &str,
) -> Result<(Book, Vec<i32>), CatalogError>
where
    B: BookRepository,
    F: AffiliationRepository,
{
    let allowed = affiliations.publisher_ids(user_id).await?;
    if allowed.is_empty() {
        return Err(CatalogError::BookNotFound);
    }
    let book = books
        .find_by_isbn(isbn)
        .await?
        .filter(|b| allowed.contains(&b.data.publisher_id))
        .ok_or(CatalogError::BookNotFound)?;
    Ok((book, allowed))
}

pub struct GetEditableBookUseCase<B: BookRepository, F: AffiliationRepository> {
    pub books: B,
    pub affiliations: F,
}

impl<B: BookRepository, F: AffiliationRepository> GetEditableBookUseCase<B, F> {
    pub async fn execute(&self, user_id: Uuid, isbn: &str) -> Result<Book, CatalogError> {
        let (book, _) = find_editable(&self.books, &self.affiliations, user_id, isbn).await?;
        Ok(book)
    }
}

pub struct EditBookUseCase<B: BookRepository, F: AffiliationRepository> {
    pub books: B,
    pub affiliations: F,
}

impl<B: BookRepository, F: AffiliationRepository> EditBookUseCase<B, F> {
    /// Replace every field. Moving to another publisher needs that one affiliated too.
    pub async fn execute(
        &self,
        user_id: Uuid,
        isbn: &str,
        input: &BookInput,
    ) -> Result<Book, CatalogError> {
        let (current, allowed) =
            find_editable(&self.books, &self.affiliations, user_id, isbn).await?;
        let data = input.validate()?;
        if !allowed.contains(&data.publisher_id) {
            return Err(CatalogError::Forbidden);
        }
        let book = self.books.update(current.id, &data).await?;
        tracing::info!(%user_id, book_id = book.id, "book updated");
        Ok(book)
    }
}
