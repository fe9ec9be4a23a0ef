use uuid::Uuid;

use liberalia_catalog::error::CatalogError;
use liberalia_catalog::usecase::book::{
    BookDetailUseCase, BookInput, CreateBookUseCase, EditBookUseCase, GetEditableBookUseCase,
    NewBookFormUseCase,
};

use crate::helpers::{MockAffiliationRepo, MockBookRepo, book, date, publisher};

const PLANETA: i32 = 1;
const ANAGRAMA: i32 = 2;

fn books() -> MockBookRepo {
    MockBookRepo::new(
        vec![
            book(1, "9780134685991", "Effective Java", PLANETA, Some(date(2018, 1, 6))),
            book(2, "9788433920867", "Cien cuentos breves", ANAGRAMA, None),
        ],
        vec![publisher(PLANETA, "Planeta"), publisher(ANAGRAMA, "Anagrama")],
    )
}

fn input(isbn: &str, publisher_id: i32) -> BookInput {
    BookInput {
        isbn: isbn.into(),
        publisher_id: publisher_id.to_string(),
        title: "Cien años de soledad".into(),
        author: "Gabriel García Márquez".into(),
        binding_type_id: "1".into(),
        page_count: "471".into(),
        original_language_id: "1".into(),
        edition_number: "1".into(),
        edition_date: "1967-05-30".into(),
        country_id: "1".into(),
        price: "19990".into(),
        currency_id: "1".into(),
        distributor_discount: "35".into(),
        summary: "La historia de la familia Buendía.".into(),
        ..BookInput::default()
    }
}

// ── BookDetailUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_find_detail_by_hyphenated_isbn() {
    let usecase = BookDetailUseCase { books: books() };

    let detail = usecase.execute("978-0-13-468599-1").await.unwrap();

    assert_eq!(detail.book.data.isbn, "9780134685991");
    assert_eq!(detail.publisher_name, "Planeta");
}

#[tokio::test]
async fn should_report_unknown_isbn_as_not_found() {
    let usecase = BookDetailUseCase { books: books() };
    let result = usecase.execute("0000000000").await;
    assert!(matches!(result, Err(CatalogError::BookNotFound)));
}

// ── NewBookFormUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_offer_only_affiliated_publishers() {
    let editor = Uuid::new_v4();
    let usecase = NewBookFormUseCase {
        books: books(),
        affiliations: MockAffiliationRepo::new(
            vec![(editor, ANAGRAMA)],
            vec![publisher(PLANETA, "Planeta"), publisher(ANAGRAMA, "Anagrama")],
        ),
    };

    let choices = usecase.execute(editor).await.unwrap();

    assert_eq!(choices.publishers, [publisher(ANAGRAMA, "Anagrama")]);
    assert_eq!(choices.lookups.binding_types.len(), 1);
}

// ── CreateBookUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_book_with_normalized_isbn() {
    let editor = Uuid::new_v4();
    let repo = books();
    let usecase = CreateBookUseCase {
        books: repo.clone(),
        affiliations: MockAffiliationRepo::new(vec![(editor, PLANETA)], vec![]),
    };

    let created = usecase
        .execute(editor, &input("978-0-307-47472-8", PLANETA))
        .await
        .unwrap();

    assert_eq!(created.data.isbn, "9780307474728");
    assert_eq!(created.data.edition_date, Some(date(1967, 5, 30)));
    assert_eq!(repo.books.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn should_refuse_book_for_unaffiliated_publisher() {
    let editor = Uuid::new_v4();
    let repo = books();
    let usecase = CreateBookUseCase {
        books: repo.clone(),
        affiliations: MockAffiliationRepo::new(vec![(editor, PLANETA)], vec![]),
    };

    let result = usecase.execute(editor, &input("9780307474728", ANAGRAMA)).await;

    assert!(matches!(result, Err(CatalogError::Forbidden)));
    assert_eq!(repo.books.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_invalid_book_form() {
    let editor = Uuid::new_v4();
    let usecase = CreateBookUseCase {
        books: books(),
        affiliations: MockAffiliationRepo::new(vec![(editor, PLANETA)], vec![]),
    };
    let mut bad = input("9780307474728", PLANETA);
    bad.title = "  ".into();
    bad.page_count = "0".into();

    let result = usecase.execute(editor, &bad).await;

    let Err(CatalogError::InvalidForm(fields)) = result else {
        panic!("expected InvalidForm, got {result:?}");
    };
    let names: Vec<_> = fields.iter().map(|f| f.field).collect();
    assert!(names.contains(&"title"), "{names:?}");
    assert!(names.contains(&"page_count"), "{names:?}");
}

// ── GetEditableBookUseCase / EditBookUseCase ─────────────────────────────────

#[tokio::test]
async fn should_hide_books_outside_editor_scope() {
    let editor = Uuid::new_v4();
    let usecase = GetEditableBookUseCase {
        books: books(),
        affiliations: MockAffiliationRepo::new(vec![(editor, PLANETA)], vec![]),
    };

    let own = usecase.execute(editor, "9780134685991").await.unwrap();
    let foreign = usecase.execute(editor, "9788433920867").await;

    assert_eq!(own.id, 1);
    assert!(matches!(foreign, Err(CatalogError::BookNotFound)));
}

#[tokio::test]
async fn should_replace_editable_book() {
    let editor = Uuid::new_v4();
    let repo = books();
    let usecase = EditBookUseCase {
        books: repo.clone(),
        affiliations: MockAffiliationRepo::new(vec![(editor, PLANETA)], vec![]),
    };

    let updated = usecase
        .execute(editor, "9780134685991", &input("9780134685991", PLANETA))
        .await
        .unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.data.title, "Cien años de soledad");
    assert_eq!(repo.books.lock().unwrap()[0].data.title, "Cien años de soledad");
}

#[tokio::test]
async fn should_refuse_moving_book_to_unaffiliated_publisher() {
    let editor = Uuid::new_v4();
    let repo = books();
    let usecase = EditBookUseCase {
        books: repo.clone(),
        affiliations: MockAffiliationRepo::new(vec![(editor, PLANETA)], vec![]),
    };

    let result = usecase
        .execute(editor, "9780134685991", &input("9780134685991", ANAGRAMA))
        .await;

    assert!(matches!(result, Err(CatalogError::Forbidden)));
    assert_eq!(repo.books.lock().unwrap()[0].data.title, "Effective Java");
}
