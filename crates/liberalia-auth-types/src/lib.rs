//! Session and credential types shared across Liberalia crates.
//!
//! Provides the session token, the session cookie builders, the `SessionUser`
//! extractor and password hashing.

pub mod cookie;
pub mod password;
pub mod session;
pub mod token;
