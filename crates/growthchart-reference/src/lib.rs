//! growthchart-reference
//!
//! Population reference tables and the lookups over them. Tables are
//! parsed from the bundled JSON files, validated once, and then served
//! read-only for the life of the process.

pub mod error;
pub mod manifest;
pub mod resolve;
pub mod schema;
pub mod store;
pub mod table;
