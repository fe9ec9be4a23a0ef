use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::sea_query::{Condition, Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QueryResult, QuerySelect, RelationTrait, Statement, TransactionTrait,
};
use uuid::Uuid;

use liberalia_catalog_schema::{
    binding_types, books, countries, currencies, languages, profiles, publishers,
    user_publishers, users,
};
use liberalia_core::sea_ext::{contains, icontains, iexact};
use liberalia_domain::isbn::normalize_isbn;
use liberalia_domain::listing::SortKey;
use liberalia_domain::role::UserRole;

use crate::domain::repository::{
    AccountRepository, AffiliationRepository, BookRepository, ProfileRepository,
    PublisherRepository,
};
use crate::domain::types::{
    Account, Book, BookData, BookDetail, BookFilter, BookListRow, LookupEntry, Lookups,
    Publisher, PublisherScope,
};
use crate::error::CatalogError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: Arc<DatabaseConnection>,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, CatalogError> {
        let model = users::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .context("find user by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, CatalogError> {
        let model = users::Entity::find()
            .filter(iexact(Expr::col((users::Entity, users::Column::Email)), email))
            .order_by_asc(users::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .context("find user by email")?;
        Ok(model.map(account_from_model))
    }

    async fn create_with_profile(
        &self,
        account: &Account,
        role: UserRole,
    ) -> Result<(), CatalogError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let account = account.clone();
                Box::pin(async move {
                    insert_user(txn, &account).await?;
                    insert_profile(txn, account.id, role).await?;
                    Ok(())
                })
            })
            .await
            .context("create user with profile")?;
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), CatalogError> {
        users::ActiveModel {
            id: Set(account.id),
            username: Set(account.username.clone()),
            email: Set(account.email.clone()),
            is_active: Set(account.is_active),
            updated_at: Set(account.updated_at),
            ..Default::default()
        }
        .update(self.db.as_ref())
        .await
        .context("update user")?;
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), CatalogError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .update(self.db.as_ref())
        .await
        .context("update user password")?;
        Ok(())
    }
}

async fn insert_user(txn: &DatabaseTransaction, account: &Account) -> Result<(), DbErr> {
    users::Entity::insert(users::ActiveModel {
        id: Set(account.id),
        username: Set(account.username.clone()),
        email: Set(account.email.clone()),
        password_hash: Set(account.password_hash.clone()),
        is_active: Set(account.is_active),
        created_at: Set(account.created_at),
        updated_at: Set(account.updated_at),
    })
    .exec_without_returning(txn)
    .await?;
    Ok(())
}

async fn insert_profile(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    role: UserRole,
) -> Result<(), DbErr> {
    profiles::Entity::insert(profiles::ActiveModel {
        user_id: Set(user_id),
        role: Set(role.as_str().to_owned()),
    })
    .exec_without_returning(txn)
    .await?;
    Ok(())
}

fn account_from_model(model: users::Model) -> Account {
    Account {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_role(&self, user_id: Uuid) -> Result<Option<String>, CatalogError> {
        let model = profiles::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .context("find profile")?;
        Ok(model.map(|m| m.role))
    }

    async fn ensure(&self, user_id: Uuid) -> Result<bool, CatalogError> {
        let inserted = profiles::Entity::insert(profiles::ActiveModel {
            user_id: Set(user_id),
            role: Set(UserRole::default().as_str().to_owned()),
        })
        .on_conflict(
            OnConflict::column(profiles::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db.as_ref())
        .await
        .context("ensure profile")?;
        Ok(inserted > 0)
    }

    async fn set_role(&self, user_id: Uuid, role: UserRole) -> Result<(), CatalogError> {
        profiles::Entity::insert(profiles::ActiveModel {
            user_id: Set(user_id),
            role: Set(role.as_str().to_owned()),
        })
        .on_conflict(
            OnConflict::column(profiles::Column::UserId)
                .update_column(profiles::Column::Role)
                .to_owned(),
        )
        .exec_without_returning(self.db.as_ref())
        .await
        .context("set profile role")?;
        Ok(())
    }

    async fn backfill_missing(&self) -> Result<u64, CatalogError> {
        let sql = r#"
            INSERT INTO profiles (user_id, role)
            SELECT u.id, $1
                FROM users u
                LEFT JOIN profiles p ON p.user_id = u.id
                WHERE p.user_id IS NULL
            ON CONFLICT (user_id) DO NOTHING
        "#;
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                sql,
                [UserRole::default().as_str().into()],
            ))
            .await
            .context("backfill missing profiles")?;
        Ok(result.rows_affected())
    }
}

// ── Publisher repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPublisherRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PublisherRepository for DbPublisherRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Publisher>, CatalogError> {
        let model = publishers::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .context("find publisher by id")?;
        Ok(model.map(publisher_from_model))
    }

    async fn create(&self, name: &str, tax_id: Option<&str>) -> Result<Publisher, CatalogError> {
        let model = publishers::ActiveModel {
            name: Set(name.to_owned()),
            tax_id: Set(tax_id.map(str::to_owned)),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .context("create publisher")?;
        Ok(publisher_from_model(model))
    }
}

fn publisher_from_model(model: publishers::Model) -> Publisher {
    Publisher {
        id: model.id,
        name: model.name,
        tax_id: model.tax_id,
    }
}

// ── Affiliation repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAffiliationRepository {
    pub db: Arc<DatabaseConnection>,
}

impl AffiliationRepository for DbAffiliationRepository {
    async fn publisher_ids(&self, user_id: Uuid) -> Result<Vec<i32>, CatalogError> {
        let ids = user_publishers::Entity::find()
            .select_only()
            .column(user_publishers::Column::PublisherId)
            .filter(user_publishers::Column::UserId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db.as_ref())
            .await
            .context("list affiliated publisher ids")?;
        Ok(ids)
    }

    async fn list_publishers(&self, user_id: Uuid) -> Result<Vec<Publisher>, CatalogError> {
        let models = publishers::Entity::find()
            .join(JoinType::InnerJoin, publishers::Relation::UserPublishers.def())
            .filter(user_publishers::Column::UserId.eq(user_id))
            .order_by_asc(publishers::Column::Name)
            .order_by_asc(publishers::Column::Id)
            .all(self.db.as_ref())
            .await
            .context("list affiliated publishers")?;
        Ok(models.into_iter().map(publisher_from_model).collect())
    }

    async fn affiliate(&self, user_id: Uuid, publisher_id: i32) -> Result<(), CatalogError> {
        user_publishers::Entity::insert(user_publishers::ActiveModel {
            user_id: Set(user_id),
            publisher_id: Set(publisher_id),
        })
        .on_conflict(
            OnConflict::columns([
                user_publishers::Column::UserId,
                user_publishers::Column::PublisherId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db.as_ref())
        .await
        .context("affiliate user with publisher")?;
        Ok(())
    }

    async fn unaffiliate(&self, user_id: Uuid, publisher_id: i32) -> Result<bool, CatalogError> {
        let result = user_publishers::Entity::delete_many()
            .filter(user_publishers::Column::UserId.eq(user_id))
            .filter(user_publishers::Column::PublisherId.eq(publisher_id))
            .exec(self.db.as_ref())
            .await
            .context("unaffiliate user from publisher")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: Arc<DatabaseConnection>,
}

#[derive(Debug, FromQueryResult)]
struct BookListModel {
    id: i32,
    isbn: String,
    title: String,
    author: String,
    publisher_name: String,
    edition_date: Option<chrono::NaiveDate>,
}

/// A book row plus the display values of its references.
struct BookDetailModel {
    book: books::Model,
    publisher_name: String,
    binding_type_name: String,
    original_language_name: String,
    country_name: String,
    currency_code: String,
    currency_symbol: Option<String>,
}

impl FromQueryResult for BookDetailModel {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            book: books::Model::from_query_result(res, pre)?,
            publisher_name: res.try_get(pre, "publisher_name")?,
            binding_type_name: res.try_get(pre, "binding_type_name")?,
            original_language_name: res.try_get(pre, "original_language_name")?,
            country_name: res.try_get(pre, "country_name")?,
            currency_code: res.try_get(pre, "currency_code")?,
            currency_symbol: res.try_get(pre, "currency_symbol")?,
        })
    }
}

fn book_col(col: books::Column) -> Expr {
    Expr::col((books::Entity, col))
}

/// Stored ISBN equals `isbn` as given, its normalised form, or matches ignoring case.
fn isbn_matches(isbn: &str) -> Condition {
    Condition::any()
        .add(books::Column::Isbn.eq(isbn))
        .add(books::Column::Isbn.eq(normalize_isbn(isbn)))
        .add(iexact(book_col(books::Column::Isbn), isbn))
}

impl BookRepository for DbBookRepository {
    async fn search(
        &self,
        filter: &BookFilter,
        limit: Option<u64>,
    ) -> Result<Vec<BookListRow>, CatalogError> {
        let mut query = books::Entity::find()
            .select_only()
            .columns([
                books::Column::Id,
                books::Column::Isbn,
                books::Column::Title,
                books::Column::Author,
                books::Column::EditionDate,
            ])
            .column_as(publishers::Column::Name, "publisher_name")
            .join(JoinType::InnerJoin, books::Relation::Publisher.def());

        if let PublisherScope::Only(ids) = &filter.scope {
            query = query.filter(books::Column::PublisherId.is_in(ids.iter().copied()));
        }
        if let Some(title) = &filter.title_contains {
            query = query.filter(icontains(book_col(books::Column::Title), title));
        }
        if let Some(isbn) = &filter.isbn_contains {
            query = query.filter(contains(book_col(books::Column::Isbn), isbn));
        }
        if let Some(name) = &filter.publisher_contains {
            query = query.filter(icontains(
                Expr::col((publishers::Entity, publishers::Column::Name)),
                name,
            ));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(books::Column::EditionDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(books::Column::EditionDate.lte(to));
        }

        query = match filter.sort {
            SortKey::Isbn => query.order_by_asc(books::Column::Isbn),
            SortKey::Title => query.order_by_asc(books::Column::Title),
            SortKey::Author => query.order_by_asc(books::Column::Author),
            SortKey::Publisher => query.order_by_asc(publishers::Column::Name),
            SortKey::EditionDate => query.order_by_asc(books::Column::EditionDate),
        }
        .order_by_asc(books::Column::Id);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query
            .into_model::<BookListModel>()
            .all(self.db.as_ref())
            .await
            .context("search books")?;
        Ok(rows
            .into_iter()
            .map(|r| BookListRow {
                id: r.id,
                isbn: r.isbn,
                title: r.title,
                author: r.author,
                publisher_name: r.publisher_name,
                edition_date: r.edition_date,
            })
            .collect())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CatalogError> {
        let model = books::Entity::find()
            .filter(isbn_matches(isbn))
            .order_by_asc(books::Column::Id)
            .one(self.db.as_ref())
            .await
            .context("find book by isbn")?;
        Ok(model.map(book_from_model))
    }

    async fn find_detail(&self, isbn: &str) -> Result<Option<BookDetail>, CatalogError> {
        let row = books::Entity::find()
            .column_as(publishers::Column::Name, "publisher_name")
            .column_as(binding_types::Column::Name, "binding_type_name")
            .column_as(languages::Column::Name, "original_language_name")
            .column_as(countries::Column::Name, "country_name")
            .column_as(currencies::Column::Code, "currency_code")
            .column_as(currencies::Column::Symbol, "currency_symbol")
            .join(JoinType::InnerJoin, books::Relation::Publisher.def())
            .join(JoinType::InnerJoin, books::Relation::BindingType.def())
            .join(JoinType::InnerJoin, books::Relation::OriginalLanguage.def())
            .join(JoinType::InnerJoin, books::Relation::Country.def())
            .join(JoinType::InnerJoin, books::Relation::Currency.def())
            .filter(isbn_matches(isbn))
            .order_by_asc(books::Column::Id)
            .into_model::<BookDetailModel>()
            .one(self.db.as_ref())
            .await
            .context("find book detail")?;
        Ok(row.map(|r| BookDetail {
            book: book_from_model(r.book),
            publisher_name: r.publisher_name,
            binding_type_name: r.binding_type_name,
            original_language_name: r.original_language_name,
            country_name: r.country_name,
            currency_code: r.currency_code,
            currency_symbol: r.currency_symbol,
        }))
    }

    async fn create(&self, data: &BookData) -> Result<Book, CatalogError> {
        let model = book_active_model(data)
            .insert(self.db.as_ref())
            .await
            .context("create book")?;
        Ok(book_from_model(model))
    }

    async fn update(&self, id: i32, data: &BookData) -> Result<Book, CatalogError> {
        let mut am = book_active_model(data);
        am.id = Set(id);
        let model = am.update(self.db.as_ref()).await.context("update book")?;
        Ok(book_from_model(model))
    }

    async fn lookups(&self) -> Result<Lookups, CatalogError> {
        let binding_types = binding_types::Entity::find()
            .order_by_asc(binding_types::Column::Name)
            .all(self.db.as_ref())
            .await
            .context("list binding types")?;
        let countries = countries::Entity::find()
            .order_by_asc(countries::Column::Name)
            .all(self.db.as_ref())
            .await
            .context("list countries")?;
        let currencies = currencies::Entity::find()
            .order_by_asc(currencies::Column::Code)
            .all(self.db.as_ref())
            .await
            .context("list currencies")?;
        let languages = languages::Entity::find()
            .order_by_asc(languages::Column::Name)
            .all(self.db.as_ref())
            .await
            .context("list languages")?;
        Ok(Lookups {
            binding_types: binding_types
                .into_iter()
                .map(|m| lookup_entry(m.id, m.code, m.name))
                .collect(),
            countries: countries
                .into_iter()
                .map(|m| lookup_entry(m.id, m.code, m.name))
                .collect(),
            currencies: currencies
                .into_iter()
                .map(|m| lookup_entry(m.id, m.code, m.name))
                .collect(),
            languages: languages
                .into_iter()
                .map(|m| lookup_entry(m.id, m.code, m.name))
                .collect(),
        })
    }
}

fn lookup_entry(id: i32, code: String, name: String) -> LookupEntry {
    LookupEntry { id, code, name }
}

fn book_active_model(data: &BookData) -> books::ActiveModel {
    let data = data.clone();
    books::ActiveModel {
        isbn: Set(data.isbn),
        ean: Set(data.ean),
        publisher_id: Set(data.publisher_id),
        title: Set(data.title),
        subtitle: Set(data.subtitle),
        author: Set(data.author),
        prologue_author: Set(data.prologue_author),
        translator: Set(data.translator),
        illustrator: Set(data.illustrator),
        binding_type_id: Set(data.binding_type_id),
        page_count: Set(data.page_count),
        height_cm: Set(data.height_cm),
        width_cm: Set(data.width_cm),
        thickness_cm: Set(data.thickness_cm),
        weight_g: Set(data.weight_g),
        original_language_id: Set(data.original_language_id),
        edition_number: Set(data.edition_number),
        edition_date: Set(data.edition_date),
        country_id: Set(data.country_id),
        print_number: Set(data.print_number),
        topic: Set(data.topic),
        price: Set(data.price),
        currency_id: Set(data.currency_id),
        distributor_discount: Set(data.distributor_discount),
        summary: Set(data.summary),
        image_code: Set(data.image_code),
        age_range: Set(data.age_range),
        ..Default::default()
    }
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: model.id,
        data: BookData {
            isbn: model.isbn,
            ean: model.ean,
            publisher_id: model.publisher_id,
            title: model.title,
            subtitle: model.subtitle,
            author: model.author,
            prologue_author: model.prologue_author,
            translator: model.translator,
            illustrator: model.illustrator,
            binding_type_id: model.binding_type_id,
            page_count: model.page_count,
            height_cm: model.height_cm,
            width_cm: model.width_cm,
            thickness_cm: model.thickness_cm,
            weight_g: model.weight_g,
            original_language_id: model.original_language_id,
            edition_number: model.edition_number,
            edition_date: model.edition_date,
            country_id: model.country_id,
            print_number: model.print_number,
            topic: model.topic,
            price: model.price,
            currency_id: model.currency_id,
            distributor_discount: model.distributor_discount,
            summary: model.summary,
            image_code: model.image_code,
            age_range: model.age_range,
        },
    }
}
