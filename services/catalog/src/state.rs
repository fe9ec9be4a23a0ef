use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use liberalia_auth_types::cookie::CookieSettings;
use liberalia_auth_types::session::SessionKey;

use crate::infra::db::{
    DbAccountRepository, DbAffiliationRepository, DbBookRepository, DbProfileRepository,
    DbPublisherRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub session_key: SessionKey,
    pub cookies: CookieSettings,
}

impl FromRef<AppState> for SessionKey {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn publisher_repo(&self) -> DbPublisherRepository {
        DbPublisherRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn affiliation_repo(&self) -> DbAffiliationRepository {
        DbAffiliationRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: Arc::clone(&self.db),
        }
    }
}
