use sea_orm::entity::prelude::*;

/// Catalog record ("ficha") of one book edition.
///
/// Lookup references are `ON DELETE RESTRICT`; the publisher reference cascades.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Stored normalised: no separators, upper-case.
    #[sea_orm(unique)]
    pub isbn: String,
    pub ean: Option<String>,
    pub publisher_id: i32,

    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub prologue_author: Option<String>,
    pub translator: Option<String>,
    pub illustrator: Option<String>,

    pub binding_type_id: i32,
    pub page_count: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub height_cm: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub width_cm: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub thickness_cm: Option<Decimal>,
    pub weight_g: Option<i32>,
    pub original_language_id: i32,

    pub edition_number: i32,
    pub edition_date: Option<Date>,
    pub country_id: i32,
    pub print_number: Option<i32>,
    pub topic: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub currency_id: i32,
    #[sea_orm(column_type = "Decimal(Some((4, 1)))")]
    pub distributor_discount: Decimal,

    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub image_code: Option<String>,
    pub age_range: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::publishers::Entity",
        from = "Column::PublisherId",
        to = "super::publishers::Column::Id",
        on_delete = "Cascade"
    )]
    Publisher,
    #[sea_orm(
        belongs_to = "super::binding_types::Entity",
        from = "Column::BindingTypeId",
        to = "super::binding_types::Column::Id",
        on_delete = "Restrict"
    )]
    BindingType,
    #[sea_orm(
        belongs_to = "super::languages::Entity",
        from = "Column::OriginalLanguageId",
        to = "super::languages::Column::Id",
        on_delete = "Restrict"
    )]
    OriginalLanguage,
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryId",
        to = "super::countries::Column::Id",
        on_delete = "Restrict"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::CurrencyId",
        to = "super::currencies::Column::Id",
        on_delete = "Restrict"
    )]
    Currency,
}

impl Related<super::publishers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Publisher.def()
    }
}

impl Related<super::binding_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BindingType.def()
    }
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OriginalLanguage.def()
    }
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::currencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currency.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
