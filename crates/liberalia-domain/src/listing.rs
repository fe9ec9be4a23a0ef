//! Catalog listing sort keys and limits.

use serde::{Deserialize, Serialize};

/// Maximum number of rows a panel listing shows. CSV export is not limited.
pub const PANEL_ROW_LIMIT: u64 = 1000;

/// Allow-listed `sort` query values. Ordering is always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "isbn")]
    Isbn,
    #[default]
    #[serde(rename = "titulo")]
    Title,
    #[serde(rename = "autor")]
    Author,
    #[serde(rename = "editorial")]
    Publisher,
    #[serde(rename = "fecha")]
    EditionDate,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Isbn,
        SortKey::Title,
        SortKey::Author,
        SortKey::Publisher,
        SortKey::EditionDate,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Isbn => "isbn",
            Self::Title => "titulo",
            Self::Author => "autor",
            Self::Publisher => "editorial",
            Self::EditionDate => "fecha",
        }
    }

    /// Parse a `sort` query value. Anything outside the allow-list is `None`.
    pub fn from_param(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_param() == s)
    }
}
