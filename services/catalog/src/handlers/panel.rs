use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use liberalia_auth_types::session::SessionUser;
use liberalia_domain::listing::{PANEL_ROW_LIMIT, SortKey};
use liberalia_domain::role::UserRole;

use crate::domain::types::BookListRow;
use crate::error::CatalogError;
use crate::handlers::session_role;
use crate::state::AppState;
use crate::usecase::catalog::{PanelQuery, SearchBooksUseCase, build_filter};
use crate::usecase::export::{CSV_CONTENT_TYPE, CSV_FILENAME, ExportBooksUseCase};
use crate::usecase::role::{
    LANDING_PATH, PanelAccess, PanelSpec, check_panel_access, panel_for_slug,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PanelFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_isbn: Option<String>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
    pub sort: SortKey,
}

#[derive(Serialize)]
pub struct PanelRow {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub edition_date: Option<chrono::NaiveDate>,
}

impl From<BookListRow> for PanelRow {
    fn from(row: BookListRow) -> Self {
        Self {
            isbn: row.isbn,
            title: row.title,
            author: row.author,
            publisher: row.publisher_name,
            edition_date: row.edition_date,
        }
    }
}

#[derive(Serialize)]
pub struct PanelResponse {
    pub panel: &'static str,
    pub title: &'static str,
    pub role: UserRole,
    pub can_download: bool,
    pub can_edit: bool,
    pub sorts: Vec<&'static str>,
    pub filters: PanelFilters,
    /// `true` when more rows matched than the listing shows.
    pub truncated: bool,
    pub rows: Vec<PanelRow>,
}

fn panel_filters(panel: &PanelSpec, query: &PanelQuery) -> PanelFilters {
    let filter = build_filter(panel.role, query);
    if panel.role.is_publisher_scoped() {
        PanelFilters {
            q: None,
            q_titulo: filter.title_contains,
            q_isbn: filter.isbn_contains,
            date_from: filter.date_from,
            date_to: filter.date_to,
            sort: filter.sort,
        }
    } else {
        PanelFilters {
            q: filter.publisher_contains,
            q_titulo: None,
            q_isbn: None,
            date_from: filter.date_from,
            date_to: filter.date_to,
            sort: filter.sort,
        }
    }
}

// ── GET /panel/{panel}/ ──────────────────────────────────────────────────────

pub async fn panel(
    user: SessionUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, CatalogError> {
    let panel = panel_for_slug(&slug).ok_or(CatalogError::PageNotFound)?;

    let role = session_role(&state, user.user_id).await?;
    if check_panel_access(panel, role) == PanelAccess::WrongRole {
        return Ok(Redirect::to(LANDING_PATH).into_response());
    }

    let query = PanelQuery::parse(raw_query.as_deref());
    let search = SearchBooksUseCase {
        books: state.book_repo(),
        affiliations: state.affiliation_repo(),
    };

    if query.wants_csv() {
        let csv = ExportBooksUseCase { search }
            .execute(user.user_id, panel.role, &query)
            .await?;
        let disposition = format!("attachment; filename=\"{CSV_FILENAME}\"");
        return Ok((
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_owned()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response());
    }

    let (rows, truncated) = search
        .page(user.user_id, panel.role, &query, PANEL_ROW_LIMIT)
        .await?;

    Ok(Json(PanelResponse {
        panel: panel.role.panel_slug(),
        title: panel.title,
        role: panel.role,
        can_download: panel.can_download,
        can_edit: panel.can_edit,
        sorts: SortKey::ALL.iter().map(|k| k.as_param()).collect(),
        filters: panel_filters(panel, &query),
        truncated,
        rows: rows.into_iter().map(PanelRow::from).collect(),
    })
    .into_response())
}
