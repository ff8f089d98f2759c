//! growthchart-core
//!
//! Shared vocabulary of the growth reference engine: standards, sexes,
//! measurement kinds, ages, and the result types handed to display code.
//! Also hosts the standard selector, which needs nothing but these types.

pub mod error;
pub mod models;
pub mod selector;
