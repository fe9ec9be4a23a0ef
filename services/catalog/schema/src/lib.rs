//! sea-orm entities of the catalog service.

pub mod binding_types;
pub mod books;
pub mod countries;
pub mod currencies;
pub mod languages;
pub mod profiles;
pub mod publishers;
pub mod user_publishers;
pub mod users;
