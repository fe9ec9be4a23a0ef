use axum::{
    Form, Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::prelude::Decimal;
use serde::Serialize;

use liberalia_auth_types::session::SessionUser;

use crate::domain::types::{Book, BookDetail, Lookups, Publisher};
use crate::error::CatalogError;
use crate::handlers::session_role;
use crate::state::AppState;
use crate::usecase::book::{
    BookDetailUseCase, BookInput, CreateBookUseCase, EditBookUseCase, GetEditableBookUseCase,
    NewBookFormUseCase,
};
use crate::usecase::role::LANDING_PATH;

// ── Response types ───────────────────────────────────────────────────────────

fn decimal_text(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

/// Record fields as the editor form shows them. Decimals are strings.
#[derive(Serialize)]
pub struct BookResponse {
    pub id: i32,
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
    pub height_cm: Option<String>,
    pub width_cm: Option<String>,
    pub thickness_cm: Option<String>,
    pub weight_g: Option<i32>,
    pub original_language_id: i32,
    pub edition_number: i32,
    pub edition_date: Option<chrono::NaiveDate>,
    pub country_id: i32,
    pub print_number: Option<i32>,
    pub topic: Option<String>,
    pub price: String,
    pub currency_id: i32,
    pub distributor_discount: String,
    pub summary: String,
    pub image_code: Option<String>,
    pub age_range: Option<String>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let d = book.data;
        Self {
            id: book.id,
            isbn: d.isbn,
            ean: d.ean,
            publisher_id: d.publisher_id,
            title: d.title,
            subtitle: d.subtitle,
            author: d.author,
            prologue_author: d.prologue_author,
            translator: d.translator,
            illustrator: d.illustrator,
            binding_type_id: d.binding_type_id,
            page_count: d.page_count,
            height_cm: decimal_text(d.height_cm),
            width_cm: decimal_text(d.width_cm),
            thickness_cm: decimal_text(d.thickness_cm),
            weight_g: d.weight_g,
            original_language_id: d.original_language_id,
            edition_number: d.edition_number,
            edition_date: d.edition_date,
            country_id: d.country_id,
            print_number: d.print_number,
            topic: d.topic,
            price: d.price.to_string(),
            currency_id: d.currency_id,
            distributor_discount: d.distributor_discount.to_string(),
            summary: d.summary,
            image_code: d.image_code,
            age_range: d.age_range,
        }
    }
}

#[derive(Serialize)]
pub struct BookDetailResponse {
    #[serde(flatten)]
    pub book: BookResponse,
    pub publisher: String,
    pub binding_type: String,
    pub original_language: String,
    pub country: String,
    pub currency: String,
    pub currency_symbol: Option<String>,
}

impl From<BookDetail> for BookDetailResponse {
    fn from(detail: BookDetail) -> Self {
        Self {
            book: detail.book.into(),
            publisher: detail.publisher_name,
            binding_type: detail.binding_type_name,
            original_language: detail.original_language_name,
            country: detail.country_name,
            currency: detail.currency_code,
            currency_symbol: detail.currency_symbol,
        }
    }
}

#[derive(Serialize)]
pub struct PublisherChoice {
    pub id: i32,
    pub name: String,
}

impl From<Publisher> for PublisherChoice {
    fn from(p: Publisher) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Serialize)]
pub struct BookFormResponse {
    pub publishers: Vec<PublisherChoice>,
    #[serde(flatten)]
    pub lookups: Lookups,
    /// Current values when editing an existing record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookResponse>,
}

/// `None` for editors, otherwise the landing redirect to send back.
async fn editor_gate(state: &AppState, user: &SessionUser) -> Result<Option<Response>, CatalogError> {
    let role = session_role(state, user.user_id).await?;
    if role.is_some_and(|r| r.can_edit_books()) {
        Ok(None)
    } else {
        Ok(Some(Redirect::to(LANDING_PATH).into_response()))
    }
}

// ── GET /catalogo/libro/{isbn}/ ──────────────────────────────────────────────

pub async fn book_detail(
    _user: SessionUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookDetailResponse>, CatalogError> {
    let usecase = BookDetailUseCase {
        books: state.book_repo(),
    };
    let detail = usecase.execute(&isbn).await?;
    Ok(Json(detail.into()))
}

// ── GET /panel/editor/fichas/nueva/ ──────────────────────────────────────────

pub async fn new_book_form(
    user: SessionUser,
    State(state): State<AppState>,
) -> Result<Response, CatalogError> {
    if let Some(redirect) = editor_gate(&state, &user).await? {
        return Ok(redirect);
    }
    let usecase = NewBookFormUseCase {
        books: state.book_repo(),
        affiliations: state.affiliation_repo(),
    };
    let choices = usecase.execute(user.user_id).await?;
    Ok(Json(BookFormResponse {
        publishers: choices.publishers.into_iter().map(Into::into).collect(),
        lookups: choices.lookups,
        book: None,
    })
    .into_response())
}

// ── POST /panel/editor/fichas/nueva/ ─────────────────────────────────────────

pub async fn create_book(
    user: SessionUser,
    State(state): State<AppState>,
    Form(input): Form<BookInput>,
) -> Result<Response, CatalogError> {
    if let Some(redirect) = editor_gate(&state, &user).await? {
        return Ok(redirect);
    }
    let usecase = CreateBookUseCase {
        books: state.book_repo(),
        affiliations: state.affiliation_repo(),
    };
    let book = usecase.execute(user.user_id, &input).await?;
    let location = format!("/panel/editor/fichas/{}/", book.data.isbn);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookResponse::from(book)),
    )
        .into_response())
}

// ── GET /panel/editor/fichas/{isbn}/ ─────────────────────────────────────────

pub async fn edit_book_form(
    user: SessionUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Response, CatalogError> {
    if let Some(redirect) = editor_gate(&state, &user).await? {
        return Ok(redirect);
    }
    let book = GetEditableBookUseCase {
        books: state.book_repo(),
        affiliations: state.affiliation_repo(),
    }
    .execute(user.user_id, &isbn)
    .await?;
    let choices = NewBookFormUseCase {
        books: state.book_repo(),
        affiliations: state.affiliation_repo(),
    }
    .execute(user.user_id)
    .await?;
    Ok(Json(BookFormResponse {
        publishers: choices.publishers.into_iter().map(Into::into).collect(),
        lookups: choices.lookups,
        book: Some(book.into()),
    })
    .into_response())
}

// ── POST /panel/editor/fichas/{isbn}/ ────────────────────────────────────────

pub async fn edit_book(
    user: SessionUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Form(input): Form<BookInput>,
) -> Result<Response, CatalogError> {
    if let Some(redirect) = editor_gate(&state, &user).await? {
        return Ok(redirect);
    }
    let usecase = EditBookUseCase {
        books: state.book_repo(),
        affiliations: state.affiliation_repo(),
    };
    let book = usecase.execute(user.user_id, &isbn, &input).await?;
    Ok(Json(BookResponse::from(book)).into_response())
}
