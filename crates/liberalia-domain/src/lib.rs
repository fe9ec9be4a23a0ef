//! Domain types shared across Liberalia crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod isbn;
pub mod listing;
pub mod role;
