use sea_orm::entity::prelude::*;

/// Publishing house ("editorial").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "publishers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub tax_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::books::Entity")]
    Books,
    #[sea_orm(has_many = "super::user_publishers::Entity")]
    UserPublishers,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl Related<super::user_publishers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPublishers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
