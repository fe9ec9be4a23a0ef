use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use uuid::Uuid;

use liberalia_auth_types::cookie::{CookieSettings, SESSION_COOKIE};
use liberalia_auth_types::session::SessionKey;
use liberalia_catalog::router::build_router;
use liberalia_catalog::state::AppState;
use liberalia_catalog_schema::{profiles, users};
use liberalia_testing::auth::{MockSession, TEST_SESSION_SECRET};

use crate::helpers::date;

fn server(db: DatabaseConnection) -> TestServer {
    shared_server(Arc::new(db))
}

fn shared_server(db: Arc<DatabaseConnection>) -> TestServer {
    let state = AppState {
        db,
        session_key: SessionKey::new(TEST_SESSION_SECRET),
        cookies: CookieSettings::default(),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn user_rows(user_id: Uuid, is_active: bool) -> Vec<users::Model> {
    let now = chrono::Utc::now();
    vec![users::Model {
        id: user_id,
        username: "lector".to_owned(),
        email: "lector@example.com".to_owned(),
        password_hash: String::new(),
        is_active,
        created_at: now,
        updated_at: now,
    }]
}

fn profile_rows(user_id: Uuid, role: Option<&str>) -> Vec<profiles::Model> {
    role.map(|r| {
        vec![profiles::Model {
            user_id,
            role: r.to_owned(),
        }]
    })
    .unwrap_or_default()
}

/// Role lookup of an active `user_id`: the account, then its profile.
fn session_mock(user_id: Uuid, role: Option<&str>) -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([user_rows(user_id, true)])
        .append_query_results([profile_rows(user_id, role)])
}

/// Connection answering the role lookup of `user_id` only.
fn role_db(user_id: Uuid, role: Option<&str>) -> DatabaseConnection {
    session_mock(user_id, role).into_connection()
}

fn listing_row(id: i32, isbn: &str, title: &str) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("id", Value::from(id)),
        ("isbn", Value::from(isbn)),
        ("title", Value::from(title)),
        ("author", Value::from("Gabriel García Márquez")),
        ("publisher_name", Value::from("Editorial Planeta")),
        ("edition_date", Value::from(date(1967, 5, 30))),
    ])
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header(header::LOCATION)
        .to_str()
        .unwrap()
        .to_owned()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_probe() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    server.get("/healthz").await.assert_status_ok();
}

// ── Panel gate ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_redirect_anonymous_panel_request_to_login() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = server.get("/panel/admin/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/accounts/login/");
}

#[tokio::test]
async fn should_redirect_wrong_role_to_landing() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, Some("CONSULTOR")));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/panel/admin/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn should_redirect_user_without_profile_to_landing() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, None));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/panel/consultor/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn should_return_404_for_unknown_panel() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let (name, value) = MockSession::new(Uuid::new_v4()).cookie_header();

    let response = server.get("/panel/gerente/").add_header(name, value).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "PAGE_NOT_FOUND");
}

// ── Listing and export ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_consultor_panel() {
    let user_id = Uuid::new_v4();
    let db = session_mock(user_id, Some("CONSULTOR"))
        .append_query_results([vec![listing_row(1, "9780307474728", "Cien años de soledad")]])
        .into_connection();
    let server = server(db);
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server
        .get("/panel/consultor/?q=planeta&sort=precio&date_from=ayer")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["panel"], "consultor");
    assert_eq!(body["can_download"], true);
    assert_eq!(body["filters"]["q"], "planeta");
    assert_eq!(body["filters"]["sort"], "titulo");
    assert!(body["filters"]["date_from"].is_null());
    assert_eq!(body["truncated"], false);
    assert_eq!(body["rows"][0]["isbn"], "9780307474728");
    assert_eq!(body["rows"][0]["publisher"], "Editorial Planeta");
    assert_eq!(body["rows"][0]["edition_date"], "1967-05-30");
}

#[tokio::test]
async fn should_download_csv_for_consultor() {
    let user_id = Uuid::new_v4();
    let db = session_mock(user_id, Some("CONSULTOR"))
        .append_query_results([vec![
            listing_row(1, "9780307474728", "Cien años de soledad"),
            listing_row(2, "9789500726125", "El amor en los tiempos del cólera"),
        ]])
        .into_connection();
    let server = server(db);
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server
        .get("/panel/consultor/?export=csv")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_TYPE).to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION).to_str().unwrap(),
        "attachment; filename=\"libros.csv\""
    );
    let text = response.text();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ISBN,TÍTULO,AUTOR,EDITORIAL,FECHA_EDICIÓN");
}

#[tokio::test]
async fn should_deny_editor_export_without_catalog_query() {
    let user_id = Uuid::new_v4();
    let db = Arc::new(role_db(user_id, Some("EDITOR")));
    let server = shared_server(Arc::clone(&db));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server
        .get("/panel/editor/?export=csv")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "EXPORT_FORBIDDEN");

    drop(server);
    let db = Arc::into_inner(db).expect("server released the connection");
    // Only the account and profile lookups reached the database.
    assert_eq!(db.into_transaction_log().len(), 2);
}

// ── Inactive accounts ────────────────────────────────────────────────────────

/// Connection answering the role lookup of a deactivated ADMIN.
fn inactive_admin_db(user_id: Uuid) -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([user_rows(user_id, false)])
        .append_query_results([profile_rows(user_id, Some("ADMIN"))])
        .into_connection()
}

#[tokio::test]
async fn should_deny_panel_to_deactivated_account_with_live_session() {
    let user_id = Uuid::new_v4();
    let server = server(inactive_admin_db(user_id));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/panel/admin/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn should_send_deactivated_account_home_to_login() {
    let user_id = Uuid::new_v4();
    let server = server(inactive_admin_db(user_id));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/accounts/login/");
}

#[tokio::test]
async fn should_forbid_admin_api_to_deactivated_admin() {
    let user_id = Uuid::new_v4();
    let server = server(inactive_admin_db(user_id));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server
        .post("/admin/publishers")
        .add_header(name, value)
        .json(&serde_json::json!({ "name": "Planeta" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

// ── Landing and accounts ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_send_admin_home_to_admin_panel() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, Some("ADMIN")));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/panel/admin/");
}

#[tokio::test]
async fn should_send_user_without_profile_home_to_login() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, None));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/accounts/login/");
}

#[tokio::test]
async fn should_describe_login_form_to_anonymous_caller() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = server.get("/accounts/login/").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["fields"][0]["name"], "email");
    assert_eq!(body["fields"][1]["type"], "password");
    assert_eq!(body["fields"][1]["min_length"], 6);
}

#[tokio::test]
async fn should_show_login_form_to_session_without_role() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, None));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server.get("/accounts/login/").add_header(name, value).await;

    response.assert_status_ok();
}

#[tokio::test]
async fn should_reject_blank_login_form() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = server
        .post("/accounts/login/")
        .form(&[("email", ""), ("password", "")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_FORM");
    assert_eq!(body["fields"][0]["field"], "email");
}

#[tokio::test]
async fn should_show_form_again_after_failed_login() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/accounts/login/")
        .form(&[("email", "nadie@example.com"), ("password", "secreto")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_CREDENTIALS");
    assert_eq!(body["message"], "invalid email or password");
    assert_eq!(body["form"]["action"], "/accounts/login/");
    assert_eq!(body["form"]["fields"][0]["name"], "email");
    assert!(response.maybe_header(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn should_clear_session_cookie_on_logout() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let (name, value) = MockSession::new(Uuid::new_v4()).cookie_header();

    let response = server.get("/accounts/logout/").add_header(name, value).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/accounts/login/");
    let set_cookie = response.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=;")), "{set_cookie}");
    assert!(set_cookie.contains("Max-Age=0"), "{set_cookie}");
}

// ── Admin API and book pages ─────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_admin_api_to_consultor() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, Some("CONSULTOR")));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server
        .post("/admin/publishers")
        .add_header(name, value)
        .json(&serde_json::json!({ "name": "Planeta" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_redirect_consultor_away_from_book_form() {
    let user_id = Uuid::new_v4();
    let server = server(role_db(user_id, Some("CONSULTOR")));
    let (name, value) = MockSession::new(user_id).cookie_header();

    let response = server
        .get("/panel/editor/fichas/nueva/")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn should_require_session_for_book_detail() {
    let server = server(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let response = server.get("/catalogo/libro/9780134685991/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/accounts/login/");
}
