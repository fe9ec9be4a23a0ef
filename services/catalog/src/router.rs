use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use liberalia_core::health::{database_ready, healthz};
use liberalia_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{home, login, login_form, logout, password_change},
    admin::{
        affiliate, create_publisher, create_user, list_affiliations, set_role, unaffiliate,
        update_user,
    },
    book::{book_detail, create_book, edit_book, edit_book_form, new_book_form},
    panel::panel,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/", get(home))
        .route("/accounts/login/", get(login_form).post(login))
        .route("/accounts/logout/", get(logout))
        .route("/accounts/password_change/", post(password_change))
        // Panels
        .route("/panel/{panel}/", get(panel))
        .route(
            "/panel/editor/fichas/nueva/",
            get(new_book_form).post(create_book),
        )
        .route(
            "/panel/editor/fichas/{isbn}/",
            get(edit_book_form).post(edit_book),
        )
        // Catalog
        .route("/catalogo/libro/{isbn}/", get(book_detail))
        // Admin
        .route("/admin/users", post(create_user))
        .route("/admin/users/{user_id}", patch(update_user))
        .route("/admin/users/{user_id}/role", put(set_role))
        .route(
            "/admin/users/{user_id}/publishers",
            get(list_affiliations).post(affiliate),
        )
        .route(
            "/admin/users/{user_id}/publishers/{publisher_id}",
            delete(unaffiliate),
        )
        .route("/admin/publishers", post(create_publisher))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
