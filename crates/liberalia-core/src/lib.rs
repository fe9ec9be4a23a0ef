//! Cross-cutting service plumbing: health checks, request ids, tracing setup,
//! serde helpers and sea-query helpers.

pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
