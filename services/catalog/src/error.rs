use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::FieldError;

/// Catalog service error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Login failure. Deliberately does not say whether the email exists.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid form")]
    InvalidForm(Vec<FieldError>),
    #[error("your role is not allowed to download the catalog")]
    ExportForbidden,
    #[error("forbidden")]
    Forbidden,
    #[error("book not found")]
    BookNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("publisher not found")]
    PublisherNotFound,
    #[error("affiliation not found")]
    AffiliationNotFound,
    #[error("page not found")]
    PageNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidForm(_) => "INVALID_FORM",
            Self::ExportForbidden => "EXPORT_FORBIDDEN",
            Self::Forbidden => "FORBIDDEN",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PublisherNotFound => "PUBLISHER_NOT_FOUND",
            Self::AffiliationNotFound => "AFFILIATION_NOT_FOUND",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidForm(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::ExportForbidden | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BookNotFound
            | Self::UserNotFound
            | Self::PublisherNotFound
            | Self::AffiliationNotFound
            | Self::PageNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::InvalidForm(fields) = &self {
            body["fields"] = serde_json::json!(fields);
        }
        (status, axum::Json(body)).into_response()
    }
}
