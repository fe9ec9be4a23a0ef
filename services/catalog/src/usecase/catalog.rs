use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use liberalia_domain::listing::SortKey;
use liberalia_domain::role::UserRole;

use crate::domain::repository::{AffiliationRepository, BookRepository};
use crate::domain::types::{BookFilter, BookListRow, PublisherScope};
use crate::error::CatalogError;

/// Recognised panel query parameters, kept raw so bad values degrade to "no filter".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PanelQuery {
    pub q: Option<String>,
    pub q_titulo: Option<String>,
    pub q_isbn: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: Option<String>,
    pub export: Option<String>,
}

impl PanelQuery {
    /// Parse a raw query string. A malformed string yields no parameters.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|q| serde_qs::from_str(q).ok())
            .unwrap_or_default()
    }

    pub fn wants_csv(&self) -> bool {
        self.export.as_deref() == Some("csv")
    }
}

fn text_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// `YYYY-MM-DD`, as sent by `<input type="date">`.
fn date_filter(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), "%Y-%m-%d").ok()
}

/// Translate panel parameters into a filter for `role`.
///
/// Editors filter by title and ISBN; everyone else filters by publisher name.
/// The scope is left at [`PublisherScope::All`]; the caller narrows it.
pub fn build_filter(role: UserRole, query: &PanelQuery) -> BookFilter {
    let mut filter = BookFilter {
        date_from: date_filter(query.date_from.as_deref()),
        date_to: date_filter(query.date_to.as_deref()),
        sort: query
            .sort
            .as_deref()
            .and_then(SortKey::from_param)
            .unwrap_or_default(),
        ..BookFilter::default()
    };
    if role.is_publisher_scoped() {
        filter.title_contains = text_filter(query.q_titulo.as_deref());
        filter.isbn_contains = text_filter(query.q_isbn.as_deref());
    } else {
        filter.publisher_contains = text_filter(query.q.as_deref());
    }
    filter
}

// ── SearchBooks ──────────────────────────────────────────────────────────────

pub struct SearchBooksUseCase<B: BookRepository, A: AffiliationRepository> {
    pub books: B,
    pub affiliations: A,
}

impl<B: BookRepository, A: AffiliationRepository> SearchBooksUseCase<B, A> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: UserRole,
        query: &PanelQuery,
        limit: Option<u64>,
    ) -> Result<Vec<BookListRow>, CatalogError> {
        let mut filter = build_filter(role, query);
        if role.is_publisher_scoped() {
            let ids = self.affiliations.publisher_ids(user_id).await?;
            if ids.is_empty() {
                return Ok(vec![]);
            }
            filter.scope = PublisherScope::Only(ids);
        }
        self.books.search(&filter, limit).await
    }

    /// At most `limit` listing rows, plus whether more rows matched.
    pub async fn page(
        &self,
        user_id: Uuid,
        role: UserRole,
        query: &PanelQuery,
        limit: u64,
    ) -> Result<(Vec<BookListRow>, bool), CatalogError> {
        let mut rows = self
            .execute(user_id, role, query, Some(limit.saturating_add(1)))
            .await?;
        let truncated = rows.len() as u64 > limit;
        rows.truncate(limit as usize);
        Ok((rows, truncated))
    }
}
