use anyhow::Context as _;
use uuid::Uuid;

use liberalia_domain::role::UserRole;

use crate::domain::repository::{AffiliationRepository, BookRepository};
use crate::domain::types::BookListRow;
use crate::error::CatalogError;
use crate::usecase::catalog::{PanelQuery, SearchBooksUseCase};

pub const CSV_HEADER: [&str; 5] = ["ISBN", "TÍTULO", "AUTOR", "EDITORIAL", "FECHA_EDICIÓN"];
pub const CSV_FILENAME: &str = "libros.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Write listing rows as CSV. Missing edition dates are empty cells.
pub fn write_csv(rows: &[BookListRow]) -> Result<Vec<u8>, CatalogError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).context("write csv header")?;
    for row in rows {
        let date = row
            .edition_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writer
            .write_record([
                row.isbn.as_str(),
                row.title.as_str(),
                row.author.as_str(),
                row.publisher_name.as_str(),
                date.as_str(),
            ])
            .context("write csv row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv: {}", e.error()))?;
    Ok(bytes)
}

// ── ExportBooks ──────────────────────────────────────────────────────────────

pub struct ExportBooksUseCase<B: BookRepository, A: AffiliationRepository> {
    pub search: SearchBooksUseCase<B, A>,
}

impl<B: BookRepository, A: AffiliationRepository> ExportBooksUseCase<B, A> {
    /// Full filtered catalog as CSV. Roles that may not download are refused
    /// before anything is queried.
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: UserRole,
        query: &PanelQuery,
    ) -> Result<Vec<u8>, CatalogError> {
        if !role.can_download() {
            tracing::info!(%user_id, %role, "csv export denied");
            return Err(CatalogError::ExportForbidden);
        }
        let rows = self.search.execute(user_id, role, query, None).await?;
        tracing::info!(%user_id, rows = rows.len(), "csv export");
        write_csv(&rows)
    }
}
