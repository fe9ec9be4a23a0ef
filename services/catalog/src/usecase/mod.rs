pub mod account;
pub mod affiliation;
pub mod book;
pub mod catalog;
pub mod export;
pub mod login;
pub mod role;
