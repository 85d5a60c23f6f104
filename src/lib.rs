//! Minimal todo HTTP backend backed by a local SQLite file.
//!
//! The crate is thin glue: an axum router, a serde request/response schema,
//! and single-statement SQL through sqlx. Schema creation and seeding run
//! once at startup, before the listener accepts traffic.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
